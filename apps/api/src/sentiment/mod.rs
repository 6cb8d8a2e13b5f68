//! Sentiment Scorer: lexicon and rule based polarity for (translated) English text.
//!
//! Follows the VADER heuristics:
//! 1. Each lexicon word contributes its valence; other words contribute 0.
//! 2. Boosters/dampeners in the 3 preceding words shift the valence, decayed by distance.
//! 3. A negation in the 3 preceding words flips and dampens the valence (× -0.74).
//! 4. ALL-CAPS words are emphasised when the text mixes upper and lower case.
//! 5. A contrastive "but" halves what comes before it and amplifies what follows.
//! 6. `!` and repeated `?` push the result further from neutral.
//!
//! The composite is `sum / sqrt(sum² + 15)`; the three fractions split the
//! absolute mass between positive, negative and neutral words.

pub mod lexicon;

use serde::{Deserialize, Serialize};

use lexicon::Lexicon;

const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];
const EXCLAMATION_INCREMENT: f64 = 0.292;
const QUESTION_INCREMENT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Polarity fractions of one analyzed answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    /// Normalized overall polarity in [-1, 1].
    pub composite: f64,
}

impl SentimentScore {
    pub fn neutral() -> Self {
        Self {
            negative: 0.0,
            neutral: 1.0,
            positive: 0.0,
            composite: 0.0,
        }
    }

    /// One-line summary forwarded downstream alongside each answer.
    pub fn summary(&self) -> String {
        format!(
            "Neg: {}, Neu: {}, Pos: {}, Comp: {}",
            self.negative, self.neutral, self.positive, self.composite
        )
    }
}

#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: Lexicon,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Lexicon::english())
    }
}

impl SentimentScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn score(&self, text: &str) -> SentimentScore {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentScore::neutral();
        }

        let caps_emphasis = has_mixed_caps(&tokens);
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let mut sentiments: Vec<f64> = lowered
            .iter()
            .enumerate()
            .map(|(index, word)| self.word_valence(index, word, &tokens, &lowered, caps_emphasis))
            .collect();

        apply_contrast(&lowered, &mut sentiments);

        polarity(&sentiments, punctuation_emphasis(text))
    }

    fn word_valence(
        &self,
        index: usize,
        word: &str,
        tokens: &[String],
        lowered: &[String],
        caps_emphasis: bool,
    ) -> f64 {
        if self.lexicon.booster(word).is_some() {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.valence(word) else {
            return 0.0;
        };

        if caps_emphasis && is_all_caps(&tokens[index]) {
            valence += CAPS_INCREMENT.copysign(valence);
        }

        for (distance, decay) in (1..=3).zip(BOOSTER_DECAY) {
            if index < distance {
                break;
            }
            let previous = index - distance;
            if let Some(boost) = self.lexicon.booster(&lowered[previous]) {
                let mut scalar = if valence < 0.0 { -boost } else { boost };
                if caps_emphasis && is_all_caps(&tokens[previous]) {
                    scalar += CAPS_INCREMENT.copysign(valence);
                }
                valence += scalar * decay;
            }
        }

        let negated = (1..=3)
            .filter(|distance| index >= *distance)
            .any(|distance| self.lexicon.is_negation(&lowered[index - distance]));
        if negated {
            valence *= NEGATION_SCALAR;
        }

        valence
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.replace('\u{2019}', "'")
        .split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

fn is_all_caps(token: &str) -> bool {
    let mut letters = token.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

fn has_mixed_caps(tokens: &[String]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

/// Words before the first "but" count half, words after it count one and a half.
fn apply_contrast(lowered: &[String], sentiments: &mut [f64]) {
    let Some(pivot) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (index, sentiment) in sentiments.iter_mut().enumerate() {
        if index < pivot {
            *sentiment *= 0.5;
        } else if index > pivot {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => QUESTION_CAP,
    };
    exclamations * EXCLAMATION_INCREMENT + question_emphasis
}

fn polarity(sentiments: &[f64], emphasis: f64) -> SentimentScore {
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let composite = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

    // +1/-1 per sentiment word keeps them from being drowned by neutral words.
    let mut positive_mass: f64 = sentiments.iter().filter(|s| **s > 0.0).map(|s| s + 1.0).sum();
    let mut negative_mass: f64 = sentiments.iter().filter(|s| **s < 0.0).map(|s| s - 1.0).sum();
    let neutral_count = sentiments.iter().filter(|s| **s == 0.0).count() as f64;

    if positive_mass > negative_mass.abs() {
        positive_mass += emphasis;
    } else if positive_mass < negative_mass.abs() {
        negative_mass -= emphasis;
    }

    let total = positive_mass + negative_mass.abs() + neutral_count;
    if total == 0.0 {
        return SentimentScore::neutral();
    }

    SentimentScore {
        negative: round3((negative_mass / total).abs()),
        neutral: round3(neutral_count / total),
        positive: round3(positive_mass / total),
        composite: round4(composite),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round4(value: f64) -> f64 {
    (value * 10000.0).round() / 10000.0
}
