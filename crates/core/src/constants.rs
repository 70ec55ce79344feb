//! Constants used throughout the triage core crate.
//!
//! This module contains file names and the reference severity table so that the
//! console, the CLI and the tests agree on them.

/// Default data directory when no explicit directory is configured (the working directory).
pub const DEFAULT_DATA_DIR: &str = ".";

/// Filename of the append-only credentials file.
pub const CREDENTIALS_FILENAME: &str = "patients.csv";

/// Filename of the queue snapshot, rewritten after every booking.
pub const SNAPSHOT_FILENAME: &str = "patient_queue.csv";

/// Appointment numbers start here at the beginning of every run.
pub const FIRST_APPOINTMENT_NUMBER: u32 = 1;

/// Built-in disease severities. Higher ranks are seen first.
pub const DEFAULT_SEVERITIES: [(&str, u32); 10] = [
    ("coughing", 1),
    ("cold", 1),
    ("stomach ache", 2),
    ("headache", 3),
    ("vomiting", 4),
    ("diarrhea", 4),
    ("loss in consciousness", 5),
    ("bleeding", 7),
    ("concussion", 8),
    ("heart ache", 8),
];
