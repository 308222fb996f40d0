use serde::Serialize;
use std::collections::BTreeMap;

use super::domain::TimeBucket;

/// Frequency sub-metrics: share of the observable window spent in the gym.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyMetrics {
    pub days_visited: u32,
    pub total_days: i64,
    pub percentage: f64,
    pub score: u8,
}

/// Visit share per coarse time-of-day bucket, in percent.
#[derive(Debug, Clone, Serialize)]
pub struct TimePattern {
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
}

impl TimePattern {
    pub fn share(&self, bucket: TimeBucket) -> f64 {
        match bucket {
            TimeBucket::Morning => self.morning,
            TimeBucket::Afternoon => self.afternoon,
            TimeBucket::Evening => self.evening,
        }
    }

    /// Bucket with the highest share; ties resolve in morning -> afternoon ->
    /// evening order.
    pub fn dominant(&self) -> (TimeBucket, f64) {
        let mut best = (TimeBucket::Morning, self.morning);
        for bucket in [TimeBucket::Afternoon, TimeBucket::Evening] {
            let share = self.share(bucket);
            if share > best.1 {
                best = (bucket, share);
            }
        }
        best
    }
}

/// Regularity sub-metrics: weekday spread plus the concentration figures the
/// recommendation thresholds consume.
#[derive(Debug, Clone, Serialize)]
pub struct RegularityMetrics {
    pub distinct_days: u32,
    pub day_pattern: BTreeMap<&'static str, u32>,
    pub time_pattern: TimePattern,
    pub avg_gap_between_visits: f64,
    pub consistency_metric: f64,
    pub score: u8,
}

/// Recency sub-metrics.
#[derive(Debug, Clone, Serialize)]
pub struct RecencyMetrics {
    pub days_since_last_visit: i64,
    pub score: u8,
}

/// Full consistency profile for one member.
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub score: u8,
    pub user_type: String,
    pub insights: Vec<String>,
    pub frequency: FrequencyMetrics,
    pub regularity: RegularityMetrics,
    pub recency: RecencyMetrics,
}

pub const NO_ACTIVITY_MESSAGE: &str = "No gym activity found for this user";

/// Terminal result for members without a single scan on record.
#[derive(Debug, Clone, Serialize)]
pub struct NoActivityNotice {
    pub score: u8,
    pub message: &'static str,
}

impl Default for NoActivityNotice {
    fn default() -> Self {
        Self {
            score: 0,
            message: NO_ACTIVITY_MESSAGE,
        }
    }
}

/// Outcome of a scoring request: a full report, or the no-activity notice.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScoreOutcome {
    Scored(ConsistencyReport),
    NoActivity(NoActivityNotice),
}

impl ScoreOutcome {
    pub fn total_score(&self) -> u8 {
        match self {
            Self::Scored(report) => report.score,
            Self::NoActivity(notice) => notice.score,
        }
    }

    pub fn report(&self) -> Option<&ConsistencyReport> {
        match self {
            Self::Scored(report) => Some(report),
            Self::NoActivity(_) => None,
        }
    }
}
