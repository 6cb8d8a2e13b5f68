//! Rule-based conclusion: three score tiers with a sentiment tie-break in the middle.

use serde::{Deserialize, Serialize};

use super::{Conclusion, ConclusionSource};
use crate::scoring::SentimentAggregate;

/// Tier boundaries and tie-break buffers.
///
/// Defaults: `low = 2`, `high = 7`, `positive_buffer = 0.5`, `negative_buffer = 0.5`.
/// With the default rule table scores range from -11 to 11.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConclusionThresholds {
    /// Scores strictly below this raise an eligibility concern.
    pub low: i32,
    /// Scores strictly above this are a strong recommendation.
    pub high: i32,
    /// Margin positive must reach over negative to count as positive overall.
    pub positive_buffer: f64,
    /// Margin negative must reach over positive to count as concerning.
    pub negative_buffer: f64,
}

impl Default for ConclusionThresholds {
    fn default() -> Self {
        Self {
            low: 2,
            high: 7,
            positive_buffer: 0.5,
            negative_buffer: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Concern,
    StrongRecommendation,
    PositiveOverall,
    Concerning,
    Balanced,
}

#[derive(Debug, Clone, Default)]
pub struct RuleConcluder {
    thresholds: ConclusionThresholds,
}

impl RuleConcluder {
    pub fn new(thresholds: ConclusionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ConclusionThresholds {
        &self.thresholds
    }

    pub fn verdict(&self, score: i32, aggregate: &SentimentAggregate) -> Verdict {
        let t = &self.thresholds;
        if score < t.low {
            return Verdict::Concern;
        }
        if score > t.high {
            return Verdict::StrongRecommendation;
        }

        let margin = aggregate.total_positive - aggregate.total_negative;
        if margin >= t.positive_buffer {
            Verdict::PositiveOverall
        } else if -margin >= t.negative_buffer {
            Verdict::Concerning
        } else {
            Verdict::Balanced
        }
    }

    pub fn conclude(&self, score: i32, aggregate: &SentimentAggregate, name: &str) -> Conclusion {
        let verdict = self.verdict(score, aggregate);
        Conclusion {
            text: render(verdict, score, applicant_name(name)),
            source: ConclusionSource::Rules,
            verdict: Some(verdict),
        }
    }
}

fn applicant_name(name: &str) -> &str {
    let name = name.trim();
    if name.is_empty() {
        "The applicant"
    } else {
        name
    }
}

fn render(verdict: Verdict, score: i32, name: &str) -> String {
    match verdict {
        Verdict::Concern => format!(
            "{name} raises eligibility concerns (score {score}): the profile is below \
             the minimum for a Motopack lease at this time."
        ),
        Verdict::StrongRecommendation => format!(
            "{name} has a strong profile (score {score}). Our recommendation is to \
             proceed with the Motopack lease."
        ),
        Verdict::PositiveOverall => format!(
            "{name} has a moderate profile (score {score}) and answers that are positive \
             overall; the lease can move forward with standard follow-up."
        ),
        Verdict::Concerning => format!(
            "{name} has a moderate profile (score {score}) but answers that are concerning \
             overall; review the open answers before deciding."
        ),
        Verdict::Balanced => format!(
            "{name} has a moderate profile (score {score}) with balanced answers; more \
             information is needed before deciding."
        ),
    }
}
