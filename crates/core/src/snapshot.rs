//! Queue snapshot file.
//!
//! After every booking the whole queue is written out, most urgent first, one record per
//! line as `appointment_number,name,disease,time_to_reach`. The file is replaced each time,
//! so it always mirrors the queue as of the latest booking. It is never read back into the
//! queue; [`read_snapshot`] exists for inspection only.

use crate::patient::PatientRecord;
use crate::queue::AppointmentQueue;
use crate::{TriageError, TriageResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use triage_types::{CsvField, FIELD_SEPARATOR};

/// Formats one record as a snapshot line, without the trailing newline.
pub fn format_snapshot_line(record: &PatientRecord) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}",
        record.appointment_number(),
        record.name(),
        record.disease(),
        record.time_to_reach(),
        sep = FIELD_SEPARATOR
    )
}

/// Writes every queued record to `writer` in priority order.
pub fn write_snapshot<W: Write>(queue: &AppointmentQueue, mut writer: W) -> io::Result<()> {
    for record in queue {
        writeln!(writer, "{}", format_snapshot_line(record))?;
    }
    writer.flush()
}

/// Replaces the snapshot file at `path` with the current queue contents.
///
/// # Errors
///
/// Returns `TriageError::SnapshotWrite` if the file cannot be created or written.
pub fn save_snapshot(path: &Path, queue: &AppointmentQueue) -> TriageResult<()> {
    let file = File::create(path).map_err(TriageError::SnapshotWrite)?;
    write_snapshot(queue, BufWriter::new(file)).map_err(TriageError::SnapshotWrite)?;
    tracing::debug!("wrote {} records to {}", queue.len(), path.display());
    Ok(())
}

/// Parses snapshot lines. Blank lines are skipped.
pub fn parse_snapshot<R: BufRead>(reader: R) -> TriageResult<Vec<PatientRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(TriageError::SnapshotRead)?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_snapshot_line(index + 1, line)?);
    }
    Ok(records)
}

/// Reads the snapshot file at `path`.
///
/// A missing file means nothing has been booked yet and yields an empty list.
pub fn read_snapshot(path: &Path) -> TriageResult<Vec<PatientRecord>> {
    match File::open(path) {
        Ok(file) => parse_snapshot(BufReader::new(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(TriageError::SnapshotRead(e)),
    }
}

fn parse_snapshot_line(line_number: usize, line: &str) -> TriageResult<PatientRecord> {
    let malformed = |reason: String| TriageError::MalformedSnapshot {
        line: line_number,
        reason,
    };

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [number, name, disease, minutes] = fields.as_slice() else {
        return Err(malformed(format!("expected 4 fields, found {}", fields.len())));
    };

    let number: u32 = number
        .parse()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| malformed(format!("invalid appointment number '{number}'")))?;
    let name = CsvField::new(name).map_err(|e| malformed(format!("invalid name: {e}")))?;
    if disease.trim().is_empty() {
        return Err(malformed("disease is empty".into()));
    }
    let minutes: u32 = minutes
        .parse()
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| malformed(format!("invalid time to reach '{minutes}'")))?;

    Ok(PatientRecord::new(number, name, *disease, minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::SeverityTable;
    use std::fs;
    use std::io::Cursor;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn record(number: u32, name: &str, disease: &str, minutes: u32) -> PatientRecord {
        PatientRecord::new(number, CsvField::new(name).unwrap(), disease, minutes)
    }

    fn sample_queue() -> AppointmentQueue {
        let mut queue = AppointmentQueue::new(Arc::new(SeverityTable::default()));
        queue.insert(record(1, "Alex", "headache", 5)).unwrap();
        queue.insert(record(2, "Sam", "bleeding", 10)).unwrap();
        queue.insert(record(3, "Jo", "stomach ache", 3)).unwrap();
        queue
    }

    #[test]
    fn test_write_snapshot_in_priority_order() {
        let mut out = Vec::new();
        write_snapshot(&sample_queue(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2,Sam,bleeding,10\n1,Alex,headache,5\n3,Jo,stomach ache,3\n"
        );
    }

    #[test]
    fn test_save_snapshot_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("patient_queue.csv");
        fs::write(&path, "99,Old,cold,1\n99,Old,cold,1\n99,Old,cold,1\n99,Old,cold,1\n").unwrap();

        let queue = sample_queue();
        save_snapshot(&path, &queue).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(!contents.contains("Old"));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_save_snapshot_reports_unwritable_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no-such-dir").join("patient_queue.csv");
        assert!(matches!(
            save_snapshot(&path, &sample_queue()),
            Err(TriageError::SnapshotWrite(_))
        ));
    }

    #[test]
    fn test_read_back_written_snapshot() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("patient_queue.csv");
        let queue = sample_queue();
        save_snapshot(&path, &queue).unwrap();

        let records = read_snapshot(&path).unwrap();
        assert_eq!(records, queue.to_vec());
    }

    #[test]
    fn test_read_missing_snapshot_is_empty() {
        let temp = TempDir::new().unwrap();
        let records = read_snapshot(&temp.path().join("absent.csv")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_skips_blank_lines_and_carriage_returns() {
        let input = Cursor::new("1,Sam,bleeding,10\r\n\n2,Alex,headache,5\n");
        let records = parse_snapshot(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].time_to_reach(), 10);
        assert_eq!(records[1].name().as_str(), "Alex");
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        let cases = [
            "1,Sam,bleeding",
            "1,Sam,bleeding,10,extra",
            "x,Sam,bleeding,10",
            "0,Sam,bleeding,10",
            "1,,bleeding,10",
            "1,Sam,,10",
            "1,Sam,bleeding,-4",
        ];
        for case in cases {
            let input = Cursor::new(format!("2,Alex,headache,5\n{case}\n"));
            let err = parse_snapshot(input).unwrap_err();
            assert!(
                matches!(err, TriageError::MalformedSnapshot { line: 2, .. }),
                "case {case:?} gave {err:?}"
            );
        }
    }
}
