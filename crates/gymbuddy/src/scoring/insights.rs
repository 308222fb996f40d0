use super::domain::{weekday_label, TimeBucket, WEEKDAY_ORDER};
use super::report::ConsistencyReport;

const LOW_FREQUENCY_PCT: f64 = 30.0;
const VARIED_SCHEDULE_METRIC: f64 = 50.0;
const DOMINANT_BUCKET_PCT: f64 = 70.0;
const LOW_WEEKDAY_SHARE_PCT: f64 = 5.0;
const ABSENCE_DAYS: i64 = 7;

/// Derive the ordered advisory list from a completed report.
///
/// Rules are evaluated in a fixed order and appended independently; an empty
/// list is a valid result.
pub fn recommendations(report: &ConsistencyReport) -> Vec<String> {
    let mut advice = Vec::new();

    if report.frequency.percentage < LOW_FREQUENCY_PCT {
        advice.push(
            "Try to visit more often; even one extra session a week builds the habit.".to_string(),
        );
    }

    if report.regularity.consistency_metric < VARIED_SCHEDULE_METRIC {
        advice.push(
            "Your schedule varies quite a bit. Picking fixed training days makes a routine easier to keep."
                .to_string(),
        );
    }

    let (bucket, share) = report.regularity.time_pattern.dominant();
    if share > DOMINANT_BUCKET_PCT {
        match bucket {
            TimeBucket::Morning => advice.push(
                "You're an early bird! A recurring morning class could lock in your routine."
                    .to_string(),
            ),
            TimeBucket::Evening => advice.push(
                "You train late in the day. An evening class could keep those sessions consistent."
                    .to_string(),
            ),
            TimeBucket::Afternoon => {}
        }
    }

    let total_visits: u32 = report.regularity.day_pattern.values().sum();
    if total_visits > 0 {
        let quiet_days: Vec<&'static str> = WEEKDAY_ORDER
            .iter()
            .filter_map(|day| {
                let label = weekday_label(*day);
                let count = *report.regularity.day_pattern.get(label)?;
                let visit_share = f64::from(count) / f64::from(total_visits) * 100.0;
                (visit_share < LOW_WEEKDAY_SHARE_PCT).then_some(label)
            })
            .collect();

        if !quiet_days.is_empty() {
            advice.push(format!(
                "Attendance is low on {}. A planned session there would round out your week.",
                quiet_days.join(", ")
            ));
        }
    }

    if report.recency.days_since_last_visit > ABSENCE_DAYS {
        advice.push("We miss you! It's been a while since your last visit.".to_string());
    }

    advice
}

/// Heuristic member label, e.g. "Frequent Morning Weekday".
///
/// Pure function of the completed metrics; stands in for the optional external
/// classification model.
pub(crate) fn classify(report: &ConsistencyReport) -> String {
    let tier = if report.frequency.percentage >= 60.0 {
        "Frequent"
    } else if report.frequency.percentage >= 30.0 {
        "Regular"
    } else {
        "Occasional"
    };

    let (bucket, _) = report.regularity.time_pattern.dominant();

    let total: u32 = report.regularity.day_pattern.values().sum();
    let weekend: u32 = report.regularity.day_pattern.get("Saturday").copied().unwrap_or(0)
        + report.regularity.day_pattern.get("Sunday").copied().unwrap_or(0);
    let mix = if total == 0 {
        "Mixed"
    } else {
        let weekend_share = f64::from(weekend) / f64::from(total);
        if weekend_share <= 0.3 {
            "Weekday"
        } else if weekend_share >= 0.7 {
            "Weekend"
        } else {
            "Mixed"
        }
    };

    format!("{tier} {} {mix}", bucket.label())
}
