//! # Triage Core
//!
//! Core business logic for the triage booking system.
//!
//! This crate contains the data operations and file handling:
//! - The disease severity table and the ordering rule built on it
//! - The appointment queue and the booking service that feeds it
//! - The queue snapshot file written after every booking
//! - The plaintext credential file used for login
//!
//! **No console concerns**: prompting, menus and input loops belong in `triage-console`.

pub mod booking;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod patient;
pub mod priority;
pub mod queue;
pub mod severity;
pub mod snapshot;
pub mod validation;

pub use booking::{AppointmentSequence, BookingRequest, BookingService};
pub use config::CoreConfig;
pub use credentials::{CredentialStore, Credentials};
pub use error::{TriageError, TriageResult};
pub use patient::PatientRecord;
pub use priority::Priority;
pub use queue::AppointmentQueue;
pub use severity::{Rank, SeverityTable};
pub use triage_types::{CsvField, TextError};
