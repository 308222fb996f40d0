use chrono::{Datelike, NaiveDate, NaiveTime};
use std::collections::BTreeMap;

use super::domain::{ScanEvent, TimeBucket, VisitDay};

/// Collapse raw scan events into one visit per calendar day, ordered by date.
///
/// The earliest scan of a day governs its time bucket; repeated same-day scans
/// only raise the informational scan count.
pub fn reconstruct_visits(events: &[ScanEvent]) -> Vec<VisitDay> {
    let mut days: BTreeMap<NaiveDate, (u32, NaiveTime)> = BTreeMap::new();

    for event in events {
        let entry = days.entry(event.date).or_insert((0, event.time));
        entry.0 += 1;
        if event.time < entry.1 {
            entry.1 = event.time;
        }
    }

    days.into_iter()
        .map(|(date, (scans, first_scan))| VisitDay {
            date,
            scans,
            weekday: date.weekday(),
            bucket: TimeBucket::from_time(first_scan),
        })
        .collect()
}
