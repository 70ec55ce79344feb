//! Booking service.
//!
//! [`BookingService`] is the only way records get into the appointment queue. It owns the
//! queue and the appointment number sequence, validates each request, and refreshes the
//! snapshot file after every insertion.

use crate::config::CoreConfig;
use crate::constants::FIRST_APPOINTMENT_NUMBER;
use crate::patient::PatientRecord;
use crate::queue::AppointmentQueue;
use crate::severity::{Rank, SeverityTable};
use crate::snapshot::save_snapshot;
use crate::validation::validate_time_to_reach;
use crate::{TriageError, TriageResult};
use std::path::{Path, PathBuf};
use triage_types::CsvField;

/// Hands out appointment numbers in booking order.
///
/// Numbers are never reused and there is no reset; a fresh sequence starts at
/// [`FIRST_APPOINTMENT_NUMBER`] regardless of what older snapshot files contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentSequence {
    next: u32,
}

impl AppointmentSequence {
    pub fn new() -> Self {
        Self::starting_at(FIRST_APPOINTMENT_NUMBER)
    }

    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// The number the next booking will receive. `u32::MAX` itself is never handed out.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Takes the next number and advances the sequence.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::SequenceExhausted` when the sequence cannot advance past
    /// `u32::MAX`. The sequence is left unchanged.
    pub fn next_number(&mut self) -> TriageResult<u32> {
        let number = self.next;
        self.next = number
            .checked_add(1)
            .ok_or(TriageError::SequenceExhausted)?;
        Ok(number)
    }
}

impl Default for AppointmentSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// A request to book an appointment, as collected from the user.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub name: CsvField,
    pub disease: String,
    /// Minutes. Signed so that non-positive entries can be reported.
    pub time_to_reach: i64,
}

/// Books appointments into the queue and keeps the snapshot file current.
#[derive(Debug)]
pub struct BookingService {
    queue: AppointmentQueue,
    sequence: AppointmentSequence,
    snapshot_path: PathBuf,
}

impl BookingService {
    /// Creates a booking service with an empty queue and a fresh sequence.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self::with_sequence(cfg, AppointmentSequence::new())
    }

    pub fn with_sequence(cfg: &CoreConfig, sequence: AppointmentSequence) -> Self {
        Self {
            queue: AppointmentQueue::new(cfg.severity_table()),
            sequence,
            snapshot_path: cfg.snapshot_path(),
        }
    }

    /// Checks that `disease` is bookable and returns its rank.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::UnknownDisease` if it is not in the severity table.
    pub fn validate_disease(&self, disease: &str) -> TriageResult<Rank> {
        self.severity_table().rank_of(disease)
    }

    /// Books an appointment.
    ///
    /// The request is validated before a number is taken, so rejected requests do not
    /// consume appointment numbers. The snapshot is written after the record has been
    /// queued.
    ///
    /// # Errors
    ///
    /// Returns a `TriageError` if:
    /// - the disease is not in the severity table (`UnknownDisease`),
    /// - the time to reach is not positive (`InvalidTimeToReach`),
    /// - no appointment numbers are left (`SequenceExhausted`),
    /// - the snapshot cannot be written (`SnapshotWrite`). The booking itself stands in
    ///   this case and will appear in the next successful snapshot.
    pub fn book(&mut self, request: BookingRequest) -> TriageResult<PatientRecord> {
        self.validate_disease(&request.disease)?;
        let time_to_reach = validate_time_to_reach(request.time_to_reach)?;

        let record = PatientRecord::new(
            self.sequence.next_number()?,
            request.name,
            request.disease,
            time_to_reach,
        );
        self.queue.insert(record.clone())?;
        tracing::info!(
            "booked appointment {} ({}, {} min)",
            record.appointment_number(),
            record.disease(),
            record.time_to_reach()
        );

        self.save_snapshot()?;
        Ok(record)
    }

    /// Writes the current queue to the snapshot file.
    pub fn save_snapshot(&self) -> TriageResult<()> {
        save_snapshot(&self.snapshot_path, &self.queue)
    }

    pub fn queue(&self) -> &AppointmentQueue {
        &self.queue
    }

    pub fn sequence(&self) -> &AppointmentSequence {
        &self.sequence
    }

    pub fn severity_table(&self) -> &SeverityTable {
        self.queue.severity_table()
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }
}
