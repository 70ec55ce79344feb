//! Plaintext credential file.
//!
//! Each registration appends one `username,password,date_of_birth` line. A login succeeds
//! when any line matches all three fields exactly. Passwords are stored as typed; this
//! file is a convenience for a single-user console, not an authentication system.

use crate::config::CoreConfig;
use crate::{TriageError, TriageResult};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use triage_types::{CsvField, FIELD_SEPARATOR};

/// A username, password and date of birth triple.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: CsvField,
    pub password: CsvField,
    /// Free text, compared verbatim. Prompts suggest `DD/MM/YYYY`.
    pub date_of_birth: CsvField,
}

impl Credentials {
    pub fn new(
        username: impl AsRef<str>,
        password: impl AsRef<str>,
        date_of_birth: impl AsRef<str>,
    ) -> TriageResult<Self> {
        Ok(Self {
            username: CsvField::new(username)?,
            password: CsvField::new(password)?,
            date_of_birth: CsvField::new(date_of_birth)?,
        })
    }

    fn to_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.username,
            self.password,
            self.date_of_birth,
            sep = FIELD_SEPARATOR
        )
    }

    fn matches_line(&self, line: &str) -> bool {
        let mut fields = line.trim_end_matches('\r').split(FIELD_SEPARATOR);
        let mut next = || fields.next().unwrap_or("");
        let (username, password, date_of_birth) = (next(), next(), next());
        username == self.username.as_str()
            && password == self.password.as_str()
            && date_of_birth == self.date_of_birth.as_str()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("date_of_birth", &self.date_of_birth)
            .finish()
    }
}

/// Append-only store of registered credentials.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.credentials_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `credentials` to the file, creating it if needed.
    ///
    /// Registering the same triple twice is allowed and simply adds another line.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::CredentialsWrite` if the file cannot be opened or written.
    pub fn register(&self, credentials: &Credentials) -> TriageResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(TriageError::CredentialsWrite)?;
        writeln!(file, "{}", credentials.to_line()).map_err(TriageError::CredentialsWrite)?;
        tracing::info!("registered user {}", credentials.username);
        Ok(())
    }

    /// Checks whether `credentials` were registered.
    ///
    /// A credential file that does not exist yet means nobody has registered, so the
    /// result is `Ok(false)` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::CredentialsRead` for any other I/O failure.
    pub fn verify(&self, credentials: &Credentials) -> TriageResult<bool> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no credentials file at {}", self.path.display());
                return Ok(false);
            }
            Err(e) => return Err(TriageError::CredentialsRead(e)),
        };

        for line in BufReader::new(file).split(b'\n') {
            let line = line.map_err(TriageError::CredentialsRead)?;
            let Ok(line) = std::str::from_utf8(&line) else {
                tracing::debug!("skipping undecodable line in {}", self.path.display());
                continue;
            };
            if credentials.matches_line(line) {
                return Ok(true);
            }
        }

        tracing::info!("login rejected for user {}", credentials.username);
        Ok(false)
    }
}
