use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentScore;

/// Summed polarity across all analyzed answers of one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentAggregate {
    pub total_positive: f64,
    pub total_negative: f64,
}

/// Sums positive and negative fractions. Empty input yields zeros.
///
/// Terms are summed in sorted order so the floating-point result does not
/// depend on the order the scores arrive in.
pub fn aggregate<'a, I>(scores: I) -> SentimentAggregate
where
    I: IntoIterator<Item = &'a SentimentScore>,
{
    let (mut positives, mut negatives): (Vec<f64>, Vec<f64>) = scores
        .into_iter()
        .map(|score| (score.positive, score.negative))
        .unzip();

    SentimentAggregate {
        total_positive: sorted_sum(&mut positives),
        total_negative: sorted_sum(&mut negatives),
    }
}

fn sorted_sum(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}
