/// Field separator used by every flat file the booking system writes.
pub const FIELD_SEPARATOR: char = ',';

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
    /// The input text contained the field separator
    #[error("text cannot contain ','")]
    ContainsSeparator,
    /// The input text contained a line break
    #[error("text cannot contain a line break")]
    ContainsLineBreak,
}

/// A single field of a comma-separated record.
///
/// This type wraps a `String` and guarantees it can be written as one field of a
/// line-oriented, comma-separated file without escaping: it is non-empty after trimming,
/// and contains neither the field separator nor a line break.
///
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CsvField(String);

impl CsvField {
    /// Creates a new `CsvField` from the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(CsvField)` if the trimmed input is a usable field, or the
    /// matching [`TextError`] otherwise.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.contains(FIELD_SEPARATOR) {
            return Err(TextError::ContainsSeparator);
        }
        if trimmed.contains(['\n', '\r']) {
            return Err(TextError::ContainsLineBreak);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CsvField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CsvField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for CsvField {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for CsvField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for CsvField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CsvField::new(&s).map_err(serde::de::Error::custom)
    }
}
