use crate::infra::{parse_date, InMemoryScanLog, InProcessTrainer};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::Args;
use gymbuddy::config::AppConfig;
use gymbuddy::error::AppError;
use gymbuddy::scoring::domain::{weekday_label, ScanEvent, TimeBucket, WEEKDAY_ORDER};
use gymbuddy::scoring::report::ScoreOutcome;
use gymbuddy::scoring::source::CsvScanLog;
use gymbuddy::scoring::GymScoreService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// RFID UID of the member to score
    pub(crate) uid: String,
    /// Scan log CSV to read (defaults to the configured RFID_LOG_PATH)
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the demo report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { uid, log, today } = args;

    let log_path = match log {
        Some(path) => path,
        None => AppConfig::load()?.scan_log.path,
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let source = Arc::new(CsvScanLog::new(log_path.clone()));
    let trainer = Arc::new(InProcessTrainer::default());
    let service = GymScoreService::new(source, trainer);

    println!("Scan log: {}", log_path.display());
    let outcome = service.score(&uid, today).map_err(AppError::from)?;
    render_score_report(&uid, today, &outcome);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    const DEMO_UID: &str = "AA6A06B0";

    println!("Consistency scoring demo (synthetic scan history)");
    let source = Arc::new(InMemoryScanLog::new(synthetic_member_history(
        DEMO_UID, today,
    )));
    let trainer = Arc::new(InProcessTrainer::default());
    let service = GymScoreService::new(source, trainer);

    let outcome = service.score(DEMO_UID, today).map_err(AppError::from)?;
    render_score_report(DEMO_UID, today, &outcome);

    let status = service.retrain().map_err(AppError::from)?;
    println!("\nRetrain hook: {} ({})", status.state.label(), status.detail);

    Ok(())
}

/// Six weeks of mostly weekday-morning sessions, including a same-day double
/// scan, anchored so the latest visit lands on the evaluation date.
fn synthetic_member_history(uid: &str, today: NaiveDate) -> Vec<ScanEvent> {
    let morning = NaiveTime::from_hms_opt(6, 45, 0).expect("valid time");
    let second_scan = NaiveTime::from_hms_opt(6, 52, 30).expect("valid time");
    let evening = NaiveTime::from_hms_opt(18, 20, 0).expect("valid time");

    let mut events = Vec::new();
    let mut push = |date: NaiveDate, time: NaiveTime| {
        events.push(ScanEvent {
            member_id: uid.to_string(),
            date,
            time,
        });
    };

    for week in 0..6i64 {
        let anchor = today - chrono::Duration::days(week * 7);
        push(anchor, morning);
        push(anchor - chrono::Duration::days(2), morning);
        if week % 2 == 0 {
            push(anchor - chrono::Duration::days(4), evening);
        }
    }
    // Turnstile double-read on the most recent visit.
    push(today, second_scan);

    events
}

pub(crate) fn render_score_report(uid: &str, today: NaiveDate, outcome: &ScoreOutcome) {
    println!("Member {uid}, evaluated {today}");

    let report = match outcome {
        ScoreOutcome::NoActivity(notice) => {
            println!("Score: {} ({})", notice.score, notice.message);
            return;
        }
        ScoreOutcome::Scored(report) => report,
    };

    println!("Consistency score: {}/100 ({})", report.score, report.user_type);

    println!(
        "\nFrequency: {}/40 ({} of {} days, {:.1}%)",
        report.frequency.score,
        report.frequency.days_visited,
        report.frequency.total_days,
        report.frequency.percentage
    );

    println!(
        "Regularity: {}/30 ({} distinct weekdays, consistency {:.1})",
        report.regularity.score, report.regularity.distinct_days, report.regularity.consistency_metric
    );
    for day in WEEKDAY_ORDER {
        if let Some(count) = report.regularity.day_pattern.get(weekday_label(day)) {
            println!("  - {}: {} visit(s)", weekday_label(day), count);
        }
    }
    for bucket in TimeBucket::ordered() {
        println!(
            "  - {}: {:.1}%",
            bucket.label(),
            report.regularity.time_pattern.share(bucket)
        );
    }
    println!(
        "  Average gap between visits: {:.1} day(s)",
        report.regularity.avg_gap_between_visits
    );

    println!(
        "Recency: {}/30 (last visit {} day(s) ago)",
        report.recency.score, report.recency.days_since_last_visit
    );

    if report.insights.is_empty() {
        println!("\nInsights: none, keep it up");
    } else {
        println!("\nInsights");
        for insight in &report.insights {
            println!("- {insight}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_history_is_anchored_on_the_evaluation_date() {
        let today: NaiveDate = "2025-06-18".parse().expect("valid date");
        let events = synthetic_member_history("AA6A06B0", today);

        assert!(events.iter().any(|event| event.date == today));
        assert!(events.iter().all(|event| event.date <= today));
        assert!(events.len() > 12);
    }

    #[test]
    fn demo_member_scores_with_activity() {
        let today: NaiveDate = "2025-06-18".parse().expect("valid date");
        let source = Arc::new(InMemoryScanLog::new(synthetic_member_history(
            "AA6A06B0", today,
        )));
        let service = GymScoreService::new(source, Arc::new(InProcessTrainer::default()));

        let outcome = service.score("AA6A06B0", today).expect("in-memory scoring");
        let report = outcome.report().expect("synthetic member has visits");
        assert!(report.score > 0);
        assert_eq!(report.recency.days_since_last_visit, 0);
    }
}
