//! Disease severity table.
//!
//! The table maps a disease name to a [`Rank`]. Lookups are exact: names are case and
//! whitespace sensitive. A table is fixed once built; there is no way to add or remove
//! entries afterwards.

use crate::constants::DEFAULT_SEVERITIES;
use crate::patient::PatientRecord;
use crate::priority::Priority;
use crate::validation::validate_disease_name;
use crate::{TriageError, TriageResult};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Severity score of a disease. Higher is more urgent; never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Rank(u32);

impl Rank {
    pub fn new(value: u32) -> TriageResult<Self> {
        if value == 0 {
            return Err(TriageError::InvalidSeverityTable(
                "rank must be a positive integer".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable mapping from disease name to [`Rank`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityTable {
    ranks: HashMap<String, Rank>,
}

impl SeverityTable {
    /// Builds a table from `(disease, rank)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidSeverityTable` if:
    /// - no entries are given,
    /// - a disease name is blank, padded, or contains a separator or line break,
    /// - a rank is zero,
    /// - the same disease is listed twice.
    pub fn from_entries<I, S>(entries: I) -> TriageResult<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut ranks = HashMap::new();
        for (name, rank) in entries {
            let name = name.into();
            validate_disease_name(&name)?;
            let rank = Rank::new(rank)?;
            if ranks.insert(name.clone(), rank).is_some() {
                return Err(TriageError::InvalidSeverityTable(format!(
                    "disease '{name}' is listed more than once"
                )));
            }
        }

        if ranks.is_empty() {
            return Err(TriageError::InvalidSeverityTable(
                "table must contain at least one disease".into(),
            ));
        }

        Ok(Self { ranks })
    }

    /// Loads a table from a YAML mapping of disease name to rank.
    ///
    /// ```yaml
    /// bleeding: 7
    /// headache: 3
    /// ```
    pub fn load_yaml(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(TriageError::SeverityTableRead)?;
        let entries: BTreeMap<String, u32> =
            serde_yaml::from_str(&contents).map_err(TriageError::SeverityTableParse)?;
        let table = Self::from_entries(entries)?;
        tracing::debug!(
            "loaded {} severities from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Returns the rank of `disease`, or `None` when it is not in the table.
    pub fn lookup(&self, disease: &str) -> Option<Rank> {
        self.ranks.get(disease).copied()
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.ranks.contains_key(disease)
    }

    /// Like [`lookup`](Self::lookup), but an unknown disease is an error.
    pub fn rank_of(&self, disease: &str) -> TriageResult<Rank> {
        self.lookup(disease)
            .ok_or_else(|| TriageError::UnknownDisease(disease.to_string()))
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// All entries, most severe first, then alphabetically.
    pub fn entries(&self) -> Vec<(&str, Rank)> {
        let mut entries: Vec<(&str, Rank)> = self
            .ranks
            .iter()
            .map(|(name, rank)| (name.as_str(), *rank))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Compares two records by urgency.
    ///
    /// `Ordering::Greater` means `a` is seen before `b`. Records whose disease is not in
    /// the table are rejected instead of being ranked.
    pub fn compare(&self, a: &PatientRecord, b: &PatientRecord) -> TriageResult<Ordering> {
        Ok(Priority::of(a, self)?.cmp(&Priority::of(b, self)?))
    }
}

impl Default for SeverityTable {
    fn default() -> Self {
        let ranks = DEFAULT_SEVERITIES
            .iter()
            .map(|(name, rank)| ((*name).to_string(), Rank(*rank)))
            .collect();
        Self { ranks }
    }
}
