//! Ordering rule for patient records.
//!
//! A more severe disease is always seen first. Among equally severe diseases the patient
//! who is closer to the hospital is seen first.

use crate::patient::PatientRecord;
use crate::severity::{Rank, SeverityTable};
use crate::TriageResult;
use std::cmp::Ordering;

/// Urgency of a record. Greater values are more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Priority {
    rank: Rank,
    time_to_reach: u32,
}

impl Priority {
    pub fn new(rank: Rank, time_to_reach: u32) -> Self {
        Self {
            rank,
            time_to_reach,
        }
    }

    /// Resolves the priority of `record` against `table`.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::UnknownDisease` if the record's disease is not in the table.
    pub fn of(record: &PatientRecord, table: &SeverityTable) -> TriageResult<Self> {
        let rank = table.rank_of(record.disease())?;
        Ok(Self::new(rank, record.time_to_reach()))
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn time_to_reach(&self) -> u32 {
        self.time_to_reach
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            // shorter trips win, so the comparison is reversed
            .then_with(|| other.time_to_reach.cmp(&self.time_to_reach))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn priority(rank: u32, minutes: u32) -> Priority {
        Priority::new(Rank::new(rank).unwrap(), minutes)
    }

    #[test]
    fn test_higher_rank_wins() {
        assert!(priority(7, 10) > priority(3, 5));
    }

    #[test]
    fn test_equal_rank_shorter_trip_wins() {
        assert!(priority(4, 5) > priority(4, 20));
    }

    #[test]
    fn test_equal_rank_and_time_is_equivalent() {
        assert_eq!(priority(4, 5).cmp(&priority(4, 5)), Ordering::Equal);
    }

    proptest! {
        #[test]
        fn prop_rank_dominates_time(
            high in 2u32..100,
            low_offset in 1u32..100,
            t_high in 1u32..10_000,
            t_low in 1u32..10_000,
        ) {
            let low = high.saturating_sub(low_offset).max(1);
            prop_assume!(low < high);
            prop_assert!(priority(high, t_high) > priority(low, t_low));
        }

        #[test]
        fn prop_equal_rank_orders_by_time(
            rank in 1u32..100,
            a in 1u32..10_000,
            b in 1u32..10_000,
        ) {
            prop_assert_eq!(priority(rank, a).cmp(&priority(rank, b)), b.cmp(&a));
        }

        #[test]
        fn prop_ordering_is_antisymmetric(
            r1 in 1u32..10, t1 in 1u32..50,
            r2 in 1u32..10, t2 in 1u32..50,
        ) {
            let a = priority(r1, t1);
            let b = priority(r2, t2);
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }
    }
}
