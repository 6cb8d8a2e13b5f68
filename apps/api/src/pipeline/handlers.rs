//! Axum route handlers for the Submission API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::pipeline::PipelineReport;
use crate::state::AppState;
use crate::survey::AnswerSet;

#[derive(Debug, Deserialize)]
pub struct SubmissionRequest {
    pub answers: AnswerSet,
}

/// POST /api/v1/submissions
///
/// The data-policy gate runs first, so an empty answer set gets the
/// blocking policy message rather than a validation error.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(req): Json<SubmissionRequest>,
) -> Result<Json<PipelineReport>, AppError> {
    let _gate = state.submission_gate.lock().await;
    let report = state.pipeline.run(req.answers).await?;
    if report.delivery.is_success() {
        info!(
            "Submission {} finished: {}",
            report.submission_id, report.status_message
        );
    } else {
        warn!(
            "Submission {} finished without delivery: {}",
            report.submission_id, report.status_message
        );
    }
    Ok(Json(report))
}
