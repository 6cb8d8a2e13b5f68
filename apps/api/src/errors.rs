use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::conclusion::ConclusionError;
use crate::pipeline::PipelineError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Blocking message shown instead of evaluating the form.
    #[error("Data policy not accepted: {0}")]
    PolicyNotAccepted(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("LLM error: {0}")]
    Llm(String),
}

impl From<PipelineError> for AppError {
    fn from(value: PipelineError) -> Self {
        match value {
            PipelineError::DataPolicyNotAccepted => {
                AppError::PolicyNotAccepted(PipelineError::DataPolicyNotAccepted.to_string())
            }
            PipelineError::InvalidAnswer(msg) => AppError::Validation(msg),
            PipelineError::Conclusion(ConclusionError::MissingCredential) => {
                AppError::Configuration(ConclusionError::MissingCredential.to_string())
            }
            PipelineError::Conclusion(e @ ConclusionError::Remote(_)) => AppError::Llm(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PolicyNotAccepted(msg) => {
                (StatusCode::FORBIDDEN, "POLICY_NOT_ACCEPTED", msg.clone())
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIGURATION_ERROR",
                    "The evaluation service is not fully configured. Please contact Motopack."
                        .to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "The eligibility assistant is unavailable. Please submit again later."
                        .to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
