use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Single badge scan as recorded by the RFID reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub member_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Coarse classification of a scan's time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    Morning,
    Afternoon,
    Evening,
}

impl TimeBucket {
    pub const fn ordered() -> [Self; 3] {
        [Self::Morning, Self::Afternoon, Self::Evening]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    pub fn from_time(time: NaiveTime) -> Self {
        match time.hour() {
            0..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            _ => Self::Evening,
        }
    }
}

/// One calendar day on which the member generated at least one scan.
///
/// The scan count is informational only; scoring math never consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitDay {
    pub date: NaiveDate,
    pub scans: u32,
    pub weekday: Weekday,
    pub bucket: TimeBucket,
}

pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
