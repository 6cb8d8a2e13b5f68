//! Rule-Based Scorer: declarative `(field, value → delta)` table.
//!
//! Every rule looks at exactly one answer and contributes one signed delta;
//! the eligibility score is their sum, saturating at the `i32` bounds so an
//! operator-supplied table can never overflow it. A missing answer, a value of
//! the wrong type or an option the table does not know contributes 0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::survey::fields::{
    CO_SIGNER, CURRENT_LOANS, DEPENDENTS, DRIVING_LICENSE, MONTHLY_INCOME, YEARS_IN_BUSINESS,
};
use crate::survey::{Answer, AnswerSet};

/// Delta per option of one categorical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalRule {
    pub field: String,
    pub deltas: BTreeMap<String, i32>,
}

/// Half-open band `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericBand {
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    pub delta: i32,
}

impl NumericBand {
    fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map(|max| value < max).unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRule {
    pub field: String,
    pub bands: Vec<NumericBand>,
}

/// The full weight table. Loadable from JSON to retune without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    #[serde(default)]
    pub categorical: Vec<CategoricalRule>,
    #[serde(default)]
    pub numeric: Vec<NumericRule>,
}

impl Default for ScoringRules {
    /// Default table: license, loans, co-signer and income dominate; household
    /// size and business age nudge the result.
    fn default() -> Self {
        fn categorical(field: &str, deltas: &[(&str, i32)]) -> CategoricalRule {
            CategoricalRule {
                field: field.to_string(),
                deltas: deltas
                    .iter()
                    .map(|(option, delta)| (option.to_string(), *delta))
                    .collect(),
            }
        }

        fn band(min: f64, max: Option<f64>, delta: i32) -> NumericBand {
            NumericBand { min, max, delta }
        }

        Self {
            categorical: vec![
                categorical(DRIVING_LICENSE, &[("yes", 2), ("in_process", 0), ("no", -3)]),
                categorical(CURRENT_LOANS, &[("none", 2), ("one", 0), ("several", -2)]),
                categorical(CO_SIGNER, &[("yes", 2), ("no", -1)]),
                categorical(
                    MONTHLY_INCOME,
                    &[
                        ("under_1m", -2),
                        ("1m_to_2m", 0),
                        ("2m_to_3m", 1),
                        ("over_3m", 3),
                    ],
                ),
            ],
            numeric: vec![
                NumericRule {
                    field: DEPENDENTS.to_string(),
                    bands: vec![
                        band(0.0, Some(3.0), 0),
                        band(3.0, Some(5.0), -1),
                        band(5.0, None, -2),
                    ],
                },
                NumericRule {
                    field: YEARS_IN_BUSINESS.to_string(),
                    bands: vec![
                        band(0.0, Some(1.0), -1),
                        band(1.0, Some(3.0), 1),
                        band(3.0, None, 2),
                    ],
                },
            ],
        }
    }
}

/// One rule's contribution, kept for auditing the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub field: String,
    pub value: Option<String>,
    pub delta: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityScore {
    pub total: i32,
    pub components: Vec<ScoreComponent>,
}

/// Stateless evaluator over a `ScoringRules` table.
#[derive(Debug, Clone, Default)]
pub struct RuleScorer {
    rules: ScoringRules,
}

impl RuleScorer {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn score(&self, answers: &AnswerSet) -> EligibilityScore {
        let mut components = Vec::new();

        for rule in &self.rules.categorical {
            let value = answers.get(&rule.field).and_then(categorical_value);
            let delta = value
                .as_deref()
                .and_then(|option| rule.deltas.get(option))
                .copied()
                .unwrap_or(0);
            debug!(field = %rule.field, value = ?value, delta, "categorical rule");
            components.push(ScoreComponent {
                field: rule.field.clone(),
                value,
                delta,
            });
        }

        for rule in &self.rules.numeric {
            let value = answers.number(&rule.field).filter(|v| v.is_finite());
            let delta = value
                .and_then(|v| rule.bands.iter().find(|band| band.contains(v)))
                .map(|band| band.delta)
                .unwrap_or(0);
            debug!(field = %rule.field, value = ?value, delta, "numeric rule");
            components.push(ScoreComponent {
                field: rule.field.clone(),
                value: value.map(|v| Answer::Number(v).display_value()),
                delta,
            });
        }

        let total = components
            .iter()
            .fold(0i32, |total, c| total.saturating_add(c.delta));
        EligibilityScore { total, components }
    }
}

/// Normalized option key for a categorical answer. Flags read as yes/no.
fn categorical_value(answer: &Answer) -> Option<String> {
    match answer {
        Answer::Choice(option) | Answer::Text(option) => Some(option.trim().to_lowercase()),
        Answer::Flag(true) => Some("yes".to_string()),
        Answer::Flag(false) => Some("no".to_string()),
        Answer::Number(_) | Answer::Date(_) => None,
    }
}
