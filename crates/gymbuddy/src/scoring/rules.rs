use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::domain::{weekday_label, VisitDay, WEEKDAY_ORDER};
use super::report::{FrequencyMetrics, RecencyMetrics, RegularityMetrics, TimePattern};

pub(crate) const FREQUENCY_POINTS: f64 = 40.0;
pub(crate) const REGULARITY_POINTS: f64 = 30.0;
pub(crate) const RECENCY_POINTS: i64 = 30;

/// Unrounded frequency figures; the raw value feeds the final total.
#[derive(Debug, Clone)]
pub(crate) struct FrequencyBreakdown {
    pub days_visited: u32,
    pub total_days: i64,
    pub ratio: f64,
    pub raw: f64,
}

impl FrequencyBreakdown {
    pub(crate) fn to_view(&self) -> FrequencyMetrics {
        FrequencyMetrics {
            days_visited: self.days_visited,
            total_days: self.total_days,
            percentage: round1(self.ratio * 100.0),
            score: self.raw.round() as u8,
        }
    }
}

/// How often, relative to the observable window, the member visits.
///
/// Callers guarantee a non-empty visit set; the window spans from the earliest
/// visit through `today`, both endpoints included.
pub(crate) fn frequency(visits: &[VisitDay], today: NaiveDate) -> FrequencyBreakdown {
    let earliest = visits[0].date;
    let total_days = ((today - earliest).num_days() + 1).max(1);
    let days_visited = visits.len() as u32;
    let ratio = f64::from(days_visited) / total_days as f64;
    let raw = (ratio * FREQUENCY_POINTS).min(FREQUENCY_POINTS);

    FrequencyBreakdown {
        days_visited,
        total_days,
        ratio,
        raw,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RegularityBreakdown {
    pub weekday_counts: [u32; 7],
    pub bucket_counts: [u32; 3],
    pub distinct_days: u32,
    pub avg_gap_days: f64,
    pub consistency_metric: f64,
    pub raw: f64,
}

impl RegularityBreakdown {
    pub(crate) fn to_view(&self) -> RegularityMetrics {
        let total_visits: u32 = self.weekday_counts.iter().sum();
        let share = |count: u32| {
            if total_visits == 0 {
                0.0
            } else {
                round1(f64::from(count) / f64::from(total_visits) * 100.0)
            }
        };

        let day_pattern: BTreeMap<&'static str, u32> = WEEKDAY_ORDER
            .iter()
            .zip(self.weekday_counts.iter())
            .filter(|(_, count)| **count > 0)
            .map(|(day, count)| (weekday_label(*day), *count))
            .collect();

        RegularityMetrics {
            distinct_days: self.distinct_days,
            day_pattern,
            time_pattern: TimePattern {
                morning: share(self.bucket_counts[0]),
                afternoon: share(self.bucket_counts[1]),
                evening: share(self.bucket_counts[2]),
            },
            avg_gap_between_visits: round1(self.avg_gap_days),
            consistency_metric: round1(self.consistency_metric),
            score: self.raw.round() as u8,
        }
    }
}

/// How evenly spread, across weekdays, the member's attendance is.
///
/// Weekday breadth drives the sub-score; the consistency metric instead
/// measures concentration around the dominant weekday/time pattern and is
/// consumed only by the recommendation thresholds.
pub(crate) fn regularity(visits: &[VisitDay]) -> RegularityBreakdown {
    let mut weekday_counts = [0u32; 7];
    let mut bucket_counts = [0u32; 3];

    for visit in visits {
        weekday_counts[visit.weekday.num_days_from_monday() as usize] += 1;
        bucket_counts[visit.bucket as usize] += 1;
    }

    let distinct_days = weekday_counts.iter().filter(|count| **count > 0).count() as u32;
    let total_visits = visits.len() as f64;

    let avg_gap_days = if visits.len() < 2 {
        0.0
    } else {
        let spanned = visits
            .windows(2)
            .map(|pair| (pair[1].date - pair[0].date).num_days())
            .sum::<i64>();
        spanned as f64 / (visits.len() - 1) as f64
    };

    let weekday_peak = weekday_counts.iter().max().copied().unwrap_or(0);
    let bucket_peak = bucket_counts.iter().max().copied().unwrap_or(0);
    let consistency_metric = if visits.is_empty() {
        0.0
    } else {
        let weekday_share = f64::from(weekday_peak) / total_visits * 100.0;
        let bucket_share = f64::from(bucket_peak) / total_visits * 100.0;
        (weekday_share + bucket_share) / 2.0
    };

    let raw = (f64::from(distinct_days) / 7.0 * REGULARITY_POINTS).min(REGULARITY_POINTS);

    RegularityBreakdown {
        weekday_counts,
        bucket_counts,
        distinct_days,
        avg_gap_days,
        consistency_metric,
        raw,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecencyBreakdown {
    pub days_since_last_visit: i64,
    pub raw: f64,
}

impl RecencyBreakdown {
    pub(crate) fn to_view(&self) -> RecencyMetrics {
        RecencyMetrics {
            days_since_last_visit: self.days_since_last_visit,
            score: self.raw.round() as u8,
        }
    }
}

/// Step-function decay over days since the most recent visit.
pub(crate) fn recency(visits: &[VisitDay], today: NaiveDate) -> RecencyBreakdown {
    let latest = visits[visits.len() - 1].date;
    let days_since_last_visit = (today - latest).num_days().max(0);

    let points = match days_since_last_visit {
        0 => RECENCY_POINTS,
        1..=2 => 25,
        3..=5 => 15,
        6..=10 => 10,
        late => (RECENCY_POINTS - late).max(0),
    };

    RecencyBreakdown {
        days_since_last_visit,
        raw: points as f64,
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::TimeBucket;
    use chrono::Datelike;

    fn visit(date: &str, bucket: TimeBucket) -> VisitDay {
        let date: NaiveDate = date.parse().expect("valid date");
        VisitDay {
            date,
            scans: 1,
            weekday: date.weekday(),
            bucket,
        }
    }

    fn day(date: &str) -> NaiveDate {
        date.parse().expect("valid date")
    }

    #[test]
    fn recency_points_follow_the_step_policy() {
        let today = day("2025-06-22");
        let cases = [
            (0i64, 30.0),
            (1, 25.0),
            (2, 25.0),
            (3, 15.0),
            (5, 15.0),
            (6, 10.0),
            (10, 10.0),
            (12, 18.0),
            (15, 15.0),
            (30, 0.0),
            (45, 0.0),
        ];

        for (days_ago, expected) in cases {
            let visits = vec![visit(
                &(today - chrono::Duration::days(days_ago)).to_string(),
                TimeBucket::Morning,
            )];
            let breakdown = recency(&visits, today);
            assert_eq!(breakdown.days_since_last_visit, days_ago);
            assert_eq!(breakdown.raw, expected, "days_ago={days_ago}");
        }
    }

    #[test]
    fn single_visit_today_spans_one_day() {
        let today = day("2025-06-18");
        let visits = vec![visit("2025-06-18", TimeBucket::Morning)];
        let breakdown = frequency(&visits, today);
        assert_eq!(breakdown.total_days, 1);
        assert_eq!(breakdown.days_visited, 1);
        assert_eq!(breakdown.ratio, 1.0);
        assert_eq!(breakdown.raw, FREQUENCY_POINTS);
    }

    #[test]
    fn frequency_ratio_never_exceeds_the_cap() {
        let today = day("2025-06-18");
        // A future-dated row (clock skew upstream) cannot push past the cap.
        let visits = vec![
            visit("2025-06-18", TimeBucket::Morning),
            visit("2025-06-19", TimeBucket::Morning),
        ];
        let breakdown = frequency(&visits, today);
        assert!(breakdown.raw <= FREQUENCY_POINTS);
    }

    #[test]
    fn regularity_rewards_weekday_breadth_not_volume() {
        // Twenty Tuesdays: high frequency, one distinct weekday.
        let mut tuesdays = Vec::new();
        let mut date = day("2025-01-07");
        for _ in 0..20 {
            tuesdays.push(visit(&date.to_string(), TimeBucket::Evening));
            date += chrono::Duration::days(7);
        }

        let breakdown = regularity(&tuesdays);
        assert_eq!(breakdown.distinct_days, 1);
        assert_eq!(breakdown.raw.round() as u8, 4);
        assert_eq!(breakdown.consistency_metric, 100.0);
        assert_eq!(breakdown.avg_gap_days, 7.0);
    }

    #[test]
    fn full_week_of_weekdays_maxes_the_subscore() {
        let visits: Vec<VisitDay> = (0..7)
            .map(|offset| {
                visit(
                    &(day("2025-06-16") + chrono::Duration::days(offset)).to_string(),
                    TimeBucket::Morning,
                )
            })
            .collect();

        let breakdown = regularity(&visits);
        assert_eq!(breakdown.distinct_days, 7);
        assert_eq!(breakdown.raw, REGULARITY_POINTS);
    }

    #[test]
    fn day_pattern_view_drops_weekdays_without_visits() {
        let visits = vec![
            visit("2025-06-16", TimeBucket::Morning),
            visit("2025-06-18", TimeBucket::Morning),
        ];

        let view = regularity(&visits).to_view();
        assert_eq!(view.day_pattern.len(), 2);
        assert_eq!(view.day_pattern.get("Monday"), Some(&1));
        assert_eq!(view.day_pattern.get("Wednesday"), Some(&1));
        assert!(view.day_pattern.get("Sunday").is_none());
        let total: f64 =
            view.time_pattern.morning + view.time_pattern.afternoon + view.time_pattern.evening;
        assert!((total - 100.0).abs() < 0.5);
    }
}
