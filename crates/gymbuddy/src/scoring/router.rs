use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::service::GymScoreService;
use super::source::ScanEventSource;
use super::training::ModelTrainer;

/// Body of a scoring request; `today` lets callers pin the evaluation date.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub uid: String,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Router builder exposing the scoring and retraining endpoints.
pub fn scoring_router<S, T>(service: Arc<GymScoreService<S, T>>) -> Router
where
    S: ScanEventSource + 'static,
    T: ModelTrainer + 'static,
{
    Router::new()
        .route("/gym/v1/score", post(score_handler::<S, T>))
        .route("/gym/v1/retrain", post(retrain_handler::<S, T>))
        .with_state(service)
}

pub(crate) async fn score_handler<S, T>(
    State(service): State<Arc<GymScoreService<S, T>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    S: ScanEventSource + 'static,
    T: ModelTrainer + 'static,
{
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());

    match service.score(&request.uid, today) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn retrain_handler<S, T>(
    State(service): State<Arc<GymScoreService<S, T>>>,
) -> Response
where
    S: ScanEventSource + 'static,
    T: ModelTrainer + 'static,
{
    match service.retrain() {
        Ok(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
