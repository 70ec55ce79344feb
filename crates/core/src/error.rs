#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown disease: {0}")]
    UnknownDisease(String),
    #[error("time to reach must be a positive number of minutes, got {0}")]
    InvalidTimeToReach(i64),
    #[error("invalid severity table: {0}")]
    InvalidSeverityTable(String),
    #[error("appointment numbers exhausted")]
    SequenceExhausted,
    #[error("invalid text: {0}")]
    Text(#[from] triage_types::TextError),

    #[error("failed to write credentials file: {0}")]
    CredentialsWrite(std::io::Error),
    #[error("failed to read credentials file: {0}")]
    CredentialsRead(std::io::Error),
    #[error("failed to write snapshot file: {0}")]
    SnapshotWrite(std::io::Error),
    #[error("failed to read snapshot file: {0}")]
    SnapshotRead(std::io::Error),
    #[error("malformed snapshot line {line}: {reason}")]
    MalformedSnapshot { line: usize, reason: String },
    #[error("failed to read severity table: {0}")]
    SeverityTableRead(std::io::Error),
    #[error("failed to parse severity table: {0}")]
    SeverityTableParse(serde_yaml::Error),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
