//! Line-based prompting with re-prompt loops.
//!
//! Every `read_*` method keeps asking until it gets a usable value. `Ok(None)` means the
//! input was closed before that happened.

use std::io::{self, BufRead, Write};
use triage_core::validation::validate_time_to_reach;
use triage_core::CsvField;

pub(crate) const INVALID_INTEGER: &str = "Invalid input. Please enter a valid integer: ";
pub(crate) const NOT_POSITIVE: &str = "Input must be a positive integer. Please enter again: ";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes a full line.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Writes `text` without a newline and flushes so it shows before input is read.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Reads one line with the line ending removed.
    ///
    /// A line that is not valid UTF-8 comes back empty, which every reader rejects, so the
    /// caller re-prompts instead of failing.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let mut line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!("discarding input line: {e}");
                return Ok(Some(String::new()));
            }
        };
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Reads lines until `accept` returns a value, writing `retry` after each rejection.
    pub fn read_until<T>(
        &mut self,
        retry: &str,
        mut accept: impl FnMut(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if let Some(value) = accept(line.trim()) {
                return Ok(Some(value));
            }
            self.prompt(retry)?;
        }
    }

    /// Reads a whole-line integer.
    pub fn read_integer(&mut self) -> io::Result<Option<i64>> {
        self.read_until(INVALID_INTEGER, |line| line.parse::<i64>().ok())
    }

    /// Reads a travel time in minutes: an integer that is positive and fits in `u32`.
    pub fn read_minutes(&mut self) -> io::Result<Option<u32>> {
        loop {
            let Some(value) = self.read_integer()? else {
                return Ok(None);
            };
            match validate_time_to_reach(value) {
                Ok(minutes) => return Ok(Some(minutes)),
                Err(_) => self.prompt(NOT_POSITIVE)?,
            }
        }
    }

    /// Reads a value that can be stored as one comma-separated field.
    pub fn read_field(&mut self) -> io::Result<Option<CsvField>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match CsvField::new(&line) {
                Ok(field) => return Ok(Some(field)),
                Err(e) => self.prompt(&format!("Invalid input. {e}. Please enter again: "))?,
            }
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_parts().1).unwrap()
    }

    #[test]
    fn test_read_line_strips_line_endings() {
        let mut p = prompter("first\r\nsecond\nlast");
        assert_eq!(p.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(p.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(p.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(p.read_line().unwrap(), None);
    }

    #[test]
    fn test_read_integer_reprompts() {
        let mut p = prompter("abc\n4.5\n 42 \n");
        assert_eq!(p.read_integer().unwrap(), Some(42));
        assert_eq!(written(p), format!("{INVALID_INTEGER}{INVALID_INTEGER}"));
    }

    #[test]
    fn test_read_integer_eof() {
        let mut p = prompter("nope\n");
        assert_eq!(p.read_integer().unwrap(), None);
    }

    #[test]
    fn test_read_minutes_rejects_non_positive() {
        let mut p = prompter("0\n-3\nten\n15\n");
        assert_eq!(p.read_minutes().unwrap(), Some(15));
        assert_eq!(
            written(p),
            format!("{NOT_POSITIVE}{NOT_POSITIVE}{INVALID_INTEGER}")
        );
    }

    #[test]
    fn test_read_field_rejects_blank_and_commas() {
        let mut p = prompter("\n  \nsmith,j\n Jo Smith \n");
        let field = p.read_field().unwrap().unwrap();
        assert_eq!(field.as_str(), "Jo Smith");

        let out = written(p);
        assert_eq!(out.matches("Please enter again").count(), 3);
        assert!(out.contains("text cannot contain ','"));
    }

    #[test]
    fn test_read_line_invalid_utf8_is_rejected_not_fatal() {
        let mut p = Prompter::new(Cursor::new(b"\xff\xfe\n12\n".to_vec()), Vec::new());
        assert_eq!(p.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(p.read_line().unwrap().as_deref(), Some("12"));
        assert_eq!(p.read_line().unwrap(), None);

        let mut p = Prompter::new(Cursor::new(b"\xc3\n7\n".to_vec()), Vec::new());
        assert_eq!(p.read_integer().unwrap(), Some(7));
        assert_eq!(written(p), INVALID_INTEGER);
    }

    #[test]
    fn test_read_field_reason_format() {
        let mut p = prompter("a,b\nok\n");
        p.read_field().unwrap();
        assert_eq!(
            written(p),
            "Invalid input. text cannot contain ','. Please enter again: "
        );
    }

    #[test]
    fn test_read_until_custom_rule() {
        let mut p = prompter("b\nc\na\n");
        let got = p
            .read_until("again: ", |line| (line == "a").then(|| line.to_string()))
            .unwrap();
        assert_eq!(got.as_deref(), Some("a"));
        assert_eq!(written(p), "again: again: ");
    }
}
