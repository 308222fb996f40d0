pub mod domain;
mod insights;
pub mod report;
mod router;
mod rules;
pub mod service;
pub mod source;
pub mod training;
mod visits;

pub use insights::recommendations;
pub use router::{scoring_router, ScoreRequest};
pub use service::{GymScoreService, ScoringError};
pub use visits::reconstruct_visits;

use chrono::NaiveDate;

use domain::ScanEvent;
use report::{ConsistencyReport, NoActivityNotice, ScoreOutcome};

/// Stateless scorer applying the consistency rubric to one member's events.
///
/// Each call is a pure function of the event slice and the evaluation date;
/// nothing is cached between requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsistencyScorer;

impl ConsistencyScorer {
    pub fn score(&self, events: &[ScanEvent], today: NaiveDate) -> ScoreOutcome {
        let visits = visits::reconstruct_visits(events);
        if visits.is_empty() {
            return ScoreOutcome::NoActivity(NoActivityNotice::default());
        }

        let frequency = rules::frequency(&visits, today);
        let regularity = rules::regularity(&visits);
        let recency = rules::recency(&visits, today);
        let total = (frequency.raw + regularity.raw + recency.raw).round() as u8;

        let mut report = ConsistencyReport {
            score: total,
            user_type: String::new(),
            insights: Vec::new(),
            frequency: frequency.to_view(),
            regularity: regularity.to_view(),
            recency: recency.to_view(),
        };
        report.user_type = insights::classify(&report);
        report.insights = insights::recommendations(&report);

        ScoreOutcome::Scored(report)
    }
}
