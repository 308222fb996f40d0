use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use super::report::ScoreOutcome;
use super::source::{ScanEventSource, SourceError};
use super::training::{ModelTrainer, TrainingError, TrainingStatus};
use super::ConsistencyScorer;

/// Service composing the scan-log source, the scorer, and the training hook.
pub struct GymScoreService<S, T> {
    source: Arc<S>,
    trainer: Arc<T>,
    scorer: ConsistencyScorer,
}

/// Error enumeration for scoring requests.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scan log error: {0}")]
    Source(#[from] SourceError),
}

impl<S, T> GymScoreService<S, T>
where
    S: ScanEventSource + 'static,
    T: ModelTrainer + 'static,
{
    pub fn new(source: Arc<S>, trainer: Arc<T>) -> Self {
        Self {
            source,
            trainer,
            scorer: ConsistencyScorer,
        }
    }

    /// Score one member's full scan history as of `today`.
    ///
    /// Deterministic for an unchanged log: the single source read happens
    /// here, before the pure scoring stages run.
    pub fn score(&self, member_id: &str, today: NaiveDate) -> Result<ScoreOutcome, ScoringError> {
        let batch = self.source.events_for(member_id)?;
        if batch.skipped > 0 {
            warn!(
                member_id,
                skipped = batch.skipped,
                "scoring proceeded without malformed scan rows"
            );
        }

        Ok(self.scorer.score(&batch.events, today))
    }

    /// Forward an admin retraining request to the configured backend.
    pub fn retrain(&self) -> Result<TrainingStatus, TrainingError> {
        self.trainer.retrain()
    }
}
