//! Appointment queue.
//!
//! Records are kept in an ordered map keyed by urgency, so the queue can be walked in
//! priority order any number of times without draining or copying it. Records that are
//! equally urgent come out in the order they were inserted.

use crate::patient::PatientRecord;
use crate::priority::Priority;
use crate::severity::SeverityTable;
use crate::TriageResult;
use std::cmp::Reverse;
use std::collections::{btree_map, BTreeMap};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct QueueKey {
    priority: Reverse<Priority>,
    arrival: u64,
}

/// Priority queue of booked appointments. There is no removal: the queue is a ledger.
#[derive(Debug, Clone)]
pub struct AppointmentQueue {
    table: Arc<SeverityTable>,
    entries: BTreeMap<QueueKey, PatientRecord>,
    arrivals: u64,
}

impl AppointmentQueue {
    pub fn new(table: Arc<SeverityTable>) -> Self {
        Self {
            table,
            entries: BTreeMap::new(),
            arrivals: 0,
        }
    }

    /// Adds `record` to the queue in O(log n).
    ///
    /// # Errors
    ///
    /// Returns `TriageError::UnknownDisease` if the record's disease is not in the severity
    /// table. The queue is left unchanged in that case.
    pub fn insert(&mut self, record: PatientRecord) -> TriageResult<()> {
        let priority = Priority::of(&record, &self.table)?;
        let key = QueueKey {
            priority: Reverse(priority),
            arrival: self.arrivals,
        };
        self.arrivals += 1;
        self.entries.insert(key, record);
        Ok(())
    }

    /// The most urgent record, if any.
    pub fn first(&self) -> Option<&PatientRecord> {
        self.entries.values().next()
    }

    /// Walks the queue most urgent first without modifying it.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.values(),
        }
    }

    /// Clones the queue's records into a vector, most urgent first.
    pub fn to_vec(&self) -> Vec<PatientRecord> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn severity_table(&self) -> &SeverityTable {
        &self.table
    }
}

/// Iterator over queued records in priority order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Values<'a, QueueKey, PatientRecord>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PatientRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a AppointmentQueue {
    type Item = &'a PatientRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
