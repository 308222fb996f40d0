use chrono::NaiveDate;
use gymbuddy::scoring::domain::ScanEvent;
use gymbuddy::scoring::source::{ScanBatch, ScanEventSource, SourceError};
use gymbuddy::scoring::training::{ModelTrainer, TrainingError, TrainingState, TrainingStatus};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Fixture-backed scan log for the demo command and tests.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryScanLog {
    events: Vec<ScanEvent>,
}

impl InMemoryScanLog {
    pub(crate) fn new(events: Vec<ScanEvent>) -> Self {
        Self { events }
    }
}

impl ScanEventSource for InMemoryScanLog {
    fn events_for(&self, member_id: &str) -> Result<ScanBatch, SourceError> {
        Ok(ScanBatch {
            events: self
                .events
                .iter()
                .filter(|event| event.member_id == member_id)
                .cloned()
                .collect(),
            skipped: 0,
        })
    }
}

/// Training stub standing in for the offline classification pipeline; it
/// records invocations so retrain requests stay observable.
#[derive(Debug, Default)]
pub(crate) struct InProcessTrainer {
    runs: AtomicU64,
}

impl ModelTrainer for InProcessTrainer {
    fn retrain(&self) -> Result<TrainingStatus, TrainingError> {
        let run = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(TrainingStatus {
            state: TrainingState::Completed,
            detail: format!("classification refresh pass {run} scheduled"),
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
