//! Conclusion generation: one capability, two strategies.
//!
//! `ConclusionStrategy` is chosen once from configuration and used for every
//! submission. The LLM strategy fails hard unless an explicit fallback to the
//! rule strategy is configured.

pub mod llm;
pub mod rules;

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::llm_client::{LlmError, TextGenerator};
use crate::scoring::SentimentAggregate;

pub use llm::conclude_via_llm;
pub use rules::{ConclusionThresholds, RuleConcluder, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConclusionSource {
    Rules,
    Llm,
    /// Rule conclusion produced because the LLM path failed.
    RulesFallback,
}

/// Final verdict text for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conclusion {
    pub text: String,
    pub source: ConclusionSource,
    /// Tier chosen by the rule strategy; `None` for LLM text.
    pub verdict: Option<Verdict>,
}

#[derive(Debug, Error)]
pub enum ConclusionError {
    #[error("generative service credential is not configured")]
    MissingCredential,

    #[error("LLM conclusion failed: {0}")]
    Remote(LlmError),
}

impl From<LlmError> for ConclusionError {
    fn from(value: LlmError) -> Self {
        match value {
            LlmError::MissingCredential => Self::MissingCredential,
            other => Self::Remote(other),
        }
    }
}

/// Which strategy to run, as read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConclusionMode {
    Rules,
    Llm,
}

impl FromStr for ConclusionMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rules" | "rule" => Ok(Self::Rules),
            "llm" => Ok(Self::Llm),
            other => Err(format!("unknown conclusion strategy '{other}' (expected rules|llm)")),
        }
    }
}

/// What the LLM strategy does when its call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    None,
    Rules,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "rules" | "rule" => Ok(Self::Rules),
            other => Err(format!("unknown LLM fallback '{other}' (expected none|rules)")),
        }
    }
}

/// Everything either strategy may need about one submission.
#[derive(Debug, Clone)]
pub struct ConclusionInput<'a> {
    pub name: &'a str,
    pub score: i32,
    pub aggregate: SentimentAggregate,
    pub transcript: &'a str,
}

#[derive(Clone)]
pub enum ConclusionStrategy {
    Rules(RuleConcluder),
    Llm {
        generator: Arc<dyn TextGenerator>,
        fallback: Option<RuleConcluder>,
    },
}

impl ConclusionStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            ConclusionStrategy::Rules(_) => "rules",
            ConclusionStrategy::Llm { fallback: None, .. } => "llm",
            ConclusionStrategy::Llm {
                fallback: Some(_), ..
            } => "llm+rules-fallback",
        }
    }

    pub async fn conclude(&self, input: &ConclusionInput<'_>) -> Result<Conclusion, ConclusionError> {
        match self {
            ConclusionStrategy::Rules(concluder) => {
                Ok(concluder.conclude(input.score, &input.aggregate, input.name))
            }
            ConclusionStrategy::Llm {
                generator,
                fallback,
            } => match conclude_via_llm(generator.as_ref(), input.transcript).await {
                Ok(conclusion) => Ok(conclusion),
                Err(e) => match fallback {
                    Some(concluder) => {
                        warn!("LLM conclusion failed, falling back to rules: {e}");
                        let mut conclusion =
                            concluder.conclude(input.score, &input.aggregate, input.name);
                        conclusion.source = ConclusionSource::RulesFallback;
                        Ok(conclusion)
                    }
                    None => Err(e),
                },
            },
        }
    }
}
