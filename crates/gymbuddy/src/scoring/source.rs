use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::domain::ScanEvent;

/// Well-formed events for one member, plus the count of rows dropped as
/// malformed along the way.
#[derive(Debug, Clone, Default)]
pub struct ScanBatch {
    pub events: Vec<ScanEvent>,
    pub skipped: usize,
}

/// Read-only scan-log abstraction so the engine can be exercised with
/// synthetic event sets.
pub trait ScanEventSource: Send + Sync {
    fn events_for(&self, member_id: &str) -> Result<ScanBatch, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("scan log {} unavailable: {source}", .path.display())]
    Unavailable { path: PathBuf, source: csv::Error },
}

/// RFID log backed by the physical CSV export (`UID,Date,Time`).
///
/// The file is re-read on every request; the log is the source of truth and
/// the engine holds no snapshot between calls.
#[derive(Debug, Clone)]
pub struct CsvScanLog {
    path: PathBuf,
}

impl CsvScanLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScanEventSource for CsvScanLog {
    fn events_for(&self, member_id: &str) -> Result<ScanBatch, SourceError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|source| SourceError::Unavailable {
                path: self.path.clone(),
                source,
            })?;

        Ok(parse_batch(reader, member_id))
    }
}

/// Collect one member's events, skipping malformed rows with a warning
/// instead of failing the request.
pub(crate) fn parse_batch<R: Read>(mut reader: csv::Reader<R>, member_id: &str) -> ScanBatch {
    let mut batch = ScanBatch::default();

    for row in reader.deserialize::<ScanRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(%err, "skipping unreadable scan row");
                batch.skipped += 1;
                continue;
            }
        };

        if row.uid != member_id {
            continue;
        }

        match row.event() {
            Some(event) => batch.events.push(event),
            None => {
                warn!(
                    uid = %row.uid,
                    date = %row.date,
                    time = %row.time,
                    "skipping scan row with malformed date/time"
                );
                batch.skipped += 1;
            }
        }
    }

    batch
}

#[derive(Debug, Deserialize)]
struct ScanRow {
    #[serde(rename = "UID")]
    uid: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Time")]
    time: String,
}

impl ScanRow {
    fn event(&self) -> Option<ScanEvent> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let time = parse_time(self.time.trim())?;
        Some(ScanEvent {
            member_id: self.uid.clone(),
            date,
            time,
        })
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .ok()
        .or_else(|| NaiveTime::parse_from_str(raw, "%H:%M").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &str) -> csv::Reader<Cursor<Vec<u8>>> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(Cursor::new(data.as_bytes().to_vec()))
    }

    #[test]
    fn filters_rows_to_the_requested_member() {
        let data = "UID,Date,Time\n\
                    AA6A06B0,2025-06-16,06:45:00\n\
                    C3D201FF,2025-06-16,07:02:11\n\
                    AA6A06B0,2025-06-18,18:30:00\n";

        let batch = parse_batch(reader(data), "AA6A06B0");
        assert_eq!(batch.events.len(), 2);
        assert_eq!(batch.skipped, 0);
        assert!(batch.events.iter().all(|event| event.member_id == "AA6A06B0"));
    }

    #[test]
    fn malformed_rows_are_skipped_and_counted() {
        let data = "UID,Date,Time\n\
                    AA6A06B0,2025-06-16,06:45:00\n\
                    AA6A06B0,16/06/2025,06:45:00\n\
                    AA6A06B0,2025-06-17,late\n";

        let batch = parse_batch(reader(data), "AA6A06B0");
        assert_eq!(batch.events.len(), 1);
        assert_eq!(batch.skipped, 2);
    }

    #[test]
    fn minute_precision_times_are_accepted() {
        let data = "UID,Date,Time\nAA6A06B0,2025-06-16,06:45\n";

        let batch = parse_batch(reader(data), "AA6A06B0");
        assert_eq!(batch.events.len(), 1);
        assert_eq!(
            batch.events[0].time,
            NaiveTime::from_hms_opt(6, 45, 0).expect("valid time")
        );
    }

    #[test]
    fn unknown_member_yields_an_empty_batch() {
        let data = "UID,Date,Time\nC3D201FF,2025-06-16,06:45:00\n";

        let batch = parse_batch(reader(data), "AA6A06B0");
        assert!(batch.events.is_empty());
        assert_eq!(batch.skipped, 0);
    }
}
