//! Input validation utilities.
//!
//! This module contains functions for validating values before they reach the severity
//! table or the appointment queue.

use crate::{TriageError, TriageResult};
use triage_types::FIELD_SEPARATOR;

/// Validates a travel time in minutes and narrows it to the stored width.
///
/// # Arguments
///
/// * `minutes` - The time as entered. Signed so that zero and negative entries can be
///   reported back rather than rejected by the parser.
///
/// # Errors
///
/// Returns `TriageError::InvalidTimeToReach` if the value is not positive or does not fit
/// in a `u32`.
pub fn validate_time_to_reach(minutes: i64) -> TriageResult<u32> {
    u32::try_from(minutes)
        .ok()
        .filter(|m| *m > 0)
        .ok_or(TriageError::InvalidTimeToReach(minutes))
}

/// Validates a disease name for use as a severity table key.
///
/// Keys are matched verbatim, so surrounding whitespace is rejected rather than trimmed.
/// Keys also end up as a field in the snapshot file and therefore may not contain the
/// field separator or a line break.
pub fn validate_disease_name(name: &str) -> TriageResult<()> {
    if name.trim().is_empty() {
        return Err(TriageError::InvalidSeverityTable(
            "disease name cannot be empty".into(),
        ));
    }

    if name.trim() != name {
        return Err(TriageError::InvalidSeverityTable(format!(
            "disease name '{name}' has leading or trailing whitespace"
        )));
    }

    if name.contains(FIELD_SEPARATOR) || name.contains(['\n', '\r']) {
        return Err(TriageError::InvalidSeverityTable(format!(
            "disease name '{name}' contains a separator or line break"
        )));
    }

    Ok(())
}
