// Scoring: the rule table over categorical answers and the sentiment aggregate.
// The two are independent; the conclusion step combines them.

pub mod aggregate;
pub mod rules;

pub use aggregate::{aggregate, SentimentAggregate};
pub use rules::{EligibilityScore, RuleScorer, ScoringRules};
