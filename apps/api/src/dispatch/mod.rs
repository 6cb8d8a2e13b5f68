//! Submission Dispatcher: one POST of the final payload to the automation webhook.
//!
//! Exactly one attempt per submission. Status 200 is success; every other
//! status and every transport error is a failure. Nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::survey::AnswerSet;

pub const ENDPOINT_NOT_CONFIGURED: &str = "endpoint not configured";

/// Per-question result forwarded downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    pub answer: String,
    /// `Neg: .., Neu: .., Pos: .., Comp: ..`
    pub sentiment: String,
}

/// Everything the webhook receives for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub submission_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub answers: AnswerSet,
    pub conversation: String,
    pub results: Vec<QuestionResult>,
    pub eligibility_score: i32,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryResult {
    Success,
    Failure { reason: String },
}

impl DeliveryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryResult::Success)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Posts a JSON body and reports the response status code.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<u16, TransportError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebhookTransport for HttpTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<u16, TransportError> {
        let response = self.client.post(url).json(body).send().await?;
        Ok(response.status().as_u16())
    }
}

pub struct SubmissionDispatcher {
    endpoint: Option<String>,
    transport: Arc<dyn WebhookTransport>,
}

impl SubmissionDispatcher {
    pub fn new(endpoint: Option<String>, transport: Arc<dyn WebhookTransport>) -> Self {
        Self {
            endpoint: endpoint.filter(|url| !url.trim().is_empty()),
            transport,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    pub async fn submit(&self, payload: &SubmissionPayload) -> DeliveryResult {
        let Some(endpoint) = self.endpoint.as_deref() else {
            warn!(
                "Submission {} not delivered: webhook endpoint is not configured",
                payload.submission_id
            );
            return DeliveryResult::Failure {
                reason: ENDPOINT_NOT_CONFIGURED.to_string(),
            };
        };

        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(e) => {
                return DeliveryResult::Failure {
                    reason: format!("payload could not be serialized: {e}"),
                }
            }
        };

        match self.transport.post_json(endpoint, &body).await {
            Ok(200) => {
                info!("Submission {} delivered", payload.submission_id);
                DeliveryResult::Success
            }
            Ok(status) => {
                warn!(
                    "Submission {} rejected by webhook with status {status}",
                    payload.submission_id
                );
                DeliveryResult::Failure {
                    reason: format!("endpoint returned status {status}"),
                }
            }
            Err(e) => {
                warn!("Submission {} delivery failed: {e}", payload.submission_id);
                DeliveryResult::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }
}
