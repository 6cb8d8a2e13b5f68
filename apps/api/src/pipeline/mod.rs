//! Eligibility Evaluation Pipeline: orchestrates one submission end to end.
//!
//! Flow: data-policy gate → range check → translate + score each open question →
//!       aggregate → rule score → conclude (configured strategy) → dispatch.
//!
//! Every open question gets a result, in catalog order; an unanswered one is
//! scored as empty text and stays neutral.
//!
//! Translation failures degrade and are reported as warnings. A conclusion
//! failure stops the run before dispatch. Delivery failures are reported in the
//! returned report; nothing is retried or persisted.

pub mod handlers;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::conclusion::{Conclusion, ConclusionError, ConclusionInput, ConclusionStrategy};
use crate::dispatch::{DeliveryResult, QuestionResult, SubmissionDispatcher, SubmissionPayload};
use crate::scoring::{aggregate, EligibilityScore, RuleScorer, SentimentAggregate};
use crate::sentiment::{SentimentScore, SentimentScorer};
use crate::survey::fields::{self, DATA_POLICY_ACCEPTED, FULL_NAME};
use crate::survey::AnswerSet;
use crate::translation::{translate_or_original, Translator};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("the data processing policy must be accepted before the form can be evaluated")]
    DataPolicyNotAccepted,

    #[error("{0}")]
    InvalidAnswer(String),

    #[error(transparent)]
    Conclusion(#[from] ConclusionError),
}

/// Sentiment result for one open answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedAnswer {
    pub key: String,
    pub question: String,
    pub answer: String,
    /// Text that was actually scored (translated, or the original on failure).
    pub analyzed_text: String,
    pub translation_degraded: bool,
    pub sentiment: SentimentScore,
}

/// Everything the caller needs to tell the applicant what happened.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub submission_id: Uuid,
    pub eligibility: EligibilityScore,
    pub sentiment: SentimentAggregate,
    pub analyzed_answers: Vec<AnalyzedAnswer>,
    pub conclusion: Conclusion,
    pub delivery: DeliveryResult,
    pub warnings: Vec<String>,
    pub status_message: String,
}

pub struct EligibilityPipeline {
    translator: Arc<dyn Translator>,
    target_language: String,
    sentiment: SentimentScorer,
    scorer: RuleScorer,
    concluder: ConclusionStrategy,
    dispatcher: SubmissionDispatcher,
}

impl EligibilityPipeline {
    pub fn new(
        translator: Arc<dyn Translator>,
        target_language: String,
        sentiment: SentimentScorer,
        scorer: RuleScorer,
        concluder: ConclusionStrategy,
        dispatcher: SubmissionDispatcher,
    ) -> Self {
        Self {
            translator,
            target_language,
            sentiment,
            scorer,
            concluder,
            dispatcher,
        }
    }

    pub fn strategy_label(&self) -> &'static str {
        self.concluder.label()
    }

    pub fn dispatcher_configured(&self) -> bool {
        self.dispatcher.is_configured()
    }

    /// Runs the whole pipeline for one submission.
    pub async fn run(&self, answers: AnswerSet) -> Result<PipelineReport, PipelineError> {
        if answers.flag(DATA_POLICY_ACCEPTED) != Some(true) {
            return Err(PipelineError::DataPolicyNotAccepted);
        }
        fields::check_ranges(&answers).map_err(PipelineError::InvalidAnswer)?;

        let submission_id = Uuid::new_v4();
        info!("Evaluating submission {submission_id} ({} answers)", answers.len());

        // Step 1: translate and score every open question
        let mut warnings = Vec::new();
        let analyzed_answers = self.analyze_answers(&answers, &mut warnings).await;
        info!(
            "Scored {} open questions for {submission_id} ({} translation warnings)",
            analyzed_answers.len(),
            warnings.len()
        );

        // Step 2: aggregate sentiment
        let sentiment = aggregate(analyzed_answers.iter().map(|a| &a.sentiment));

        // Step 3: rule score (independent of sentiment)
        let eligibility = self.scorer.score(&answers);
        info!(
            "Submission {submission_id}: eligibility score {}, sentiment +{:.3}/-{:.3}",
            eligibility.total, sentiment.total_positive, sentiment.total_negative
        );

        // Step 4: conclusion
        let name = answers.text(FULL_NAME).unwrap_or_default();
        let transcript = fields::render_transcript(&answers);
        let conclusion = self
            .concluder
            .conclude(&ConclusionInput {
                name,
                score: eligibility.total,
                aggregate: sentiment,
                transcript: &transcript,
            })
            .await
            .map_err(|e| {
                warn!("Submission {submission_id}: conclusion failed: {e}");
                PipelineError::from(e)
            })?;
        info!(
            "Submission {submission_id}: conclusion produced by {:?}",
            conclusion.source
        );

        // Step 5: dispatch
        let payload = SubmissionPayload {
            submission_id,
            submitted_at: Utc::now(),
            conversation: fields::render_conversation(&answers),
            results: analyzed_answers
                .iter()
                .map(|a| QuestionResult {
                    question: a.question.clone(),
                    answer: a.answer.clone(),
                    sentiment: a.sentiment.summary(),
                })
                .collect(),
            eligibility_score: eligibility.total,
            conclusion: conclusion.text.clone(),
            answers,
        };
        let delivery = self.dispatcher.submit(&payload).await;
        let status_message = status_message(&delivery);

        Ok(PipelineReport {
            submission_id,
            eligibility,
            sentiment,
            analyzed_answers,
            conclusion,
            delivery,
            warnings,
            status_message,
        })
    }

    async fn analyze_answers(
        &self,
        answers: &AnswerSet,
        warnings: &mut Vec<String>,
    ) -> Vec<AnalyzedAnswer> {
        let mut analyzed = Vec::new();
        for spec in fields::motivational_fields() {
            let text = answers.text(spec.key).unwrap_or_default();

            let translated =
                translate_or_original(self.translator.as_ref(), text, &self.target_language).await;
            if let Some(warning) = &translated.warning {
                warnings.push(format!("{}: {warning}", spec.key));
            }

            analyzed.push(AnalyzedAnswer {
                key: spec.key.to_string(),
                question: spec.label.to_string(),
                answer: text.to_string(),
                sentiment: self.sentiment.score(&translated.text),
                analyzed_text: translated.text,
                translation_degraded: translated.degraded,
            });
        }
        analyzed
    }
}

fn status_message(delivery: &DeliveryResult) -> String {
    match delivery {
        DeliveryResult::Success => "Registration evaluated and sent successfully.".to_string(),
        DeliveryResult::Failure { reason } => {
            format!("Registration evaluated but could not be sent: {reason}.")
        }
    }
}
