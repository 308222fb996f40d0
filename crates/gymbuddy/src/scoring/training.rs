use serde::Serialize;

/// Hook to the external model-training collaborator.
///
/// Scoring never depends on the trained model; the service only forwards
/// admin retraining requests through this seam.
pub trait ModelTrainer: Send + Sync {
    fn retrain(&self) -> Result<TrainingStatus, TrainingError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingState {
    Completed,
    Skipped,
}

impl TrainingState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Skipped => "Skipped",
        }
    }
}

/// Outcome of a retraining request as reported by the backend.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingStatus {
    pub state: TrainingState,
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("training backend unavailable: {0}")]
    Unavailable(String),
}
