//! English valence lexicon and modifier word lists.
//!
//! Valences sit on the usual -4.0 ..= 4.0 scale. The list is tuned toward the
//! vocabulary of small-business applicants talking about work, money and
//! setbacks rather than general-purpose coverage.

use std::collections::HashMap;

/// Word → valence pairs.
const VALENCES: &[(&str, f64)] = &[
    // positive
    ("able", 1.3),
    ("accomplish", 1.8),
    ("accomplished", 1.9),
    ("achieve", 1.9),
    ("achievement", 2.1),
    ("advantage", 1.5),
    ("ambitious", 2.1),
    ("appreciate", 1.7),
    ("benefit", 2.0),
    ("benefits", 1.6),
    ("best", 3.2),
    ("better", 1.9),
    ("calm", 1.3),
    ("capable", 1.6),
    ("careful", 0.6),
    ("carefully", 0.8),
    ("certain", 1.1),
    ("clients", 0.4),
    ("comfortable", 1.5),
    ("committed", 1.1),
    ("confident", 2.2),
    ("consistent", 1.2),
    ("creative", 1.9),
    ("dedicated", 2.0),
    ("determined", 1.4),
    ("easy", 1.9),
    ("easier", 1.8),
    ("effective", 2.1),
    ("efficient", 1.8),
    ("enjoy", 2.2),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fair", 1.3),
    ("faith", 1.8),
    ("fine", 0.8),
    ("focus", 1.0),
    ("focused", 1.6),
    ("fortunate", 1.9),
    ("free", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("grow", 1.5),
    ("growing", 1.3),
    ("growth", 1.6),
    ("happy", 2.7),
    ("hard-working", 1.9),
    ("help", 1.7),
    ("helpful", 1.8),
    ("honest", 2.3),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("independent", 1.1),
    ("love", 3.2),
    ("loyal", 2.1),
    ("motivated", 1.9),
    ("opportunity", 1.8),
    ("opportunities", 1.6),
    ("optimistic", 2.3),
    ("organized", 1.2),
    ("passion", 2.0),
    ("patience", 1.5),
    ("patient", 1.3),
    ("peace", 2.5),
    ("perfect", 2.7),
    ("persevere", 1.7),
    ("plan", 0.6),
    ("positive", 2.6),
    ("profit", 1.9),
    ("profitable", 2.1),
    ("progress", 1.8),
    ("prosper", 2.2),
    ("proud", 2.1),
    ("punctual", 1.3),
    ("ready", 1.5),
    ("reliable", 1.9),
    ("relax", 1.9),
    ("resilient", 1.9),
    ("respect", 2.1),
    ("responsible", 1.3),
    ("safe", 1.9),
    ("save", 2.2),
    ("saving", 1.3),
    ("savings", 1.4),
    ("secure", 1.4),
    ("solve", 0.8),
    ("solution", 1.3),
    ("solutions", 1.3),
    ("stable", 1.2),
    ("strong", 2.3),
    ("strength", 2.2),
    ("success", 2.7),
    ("successful", 2.8),
    ("support", 1.7),
    ("sure", 1.3),
    ("thankful", 2.7),
    ("trust", 2.3),
    ("useful", 1.9),
    ("well", 1.1),
    ("willing", 1.1),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worth", 0.9),
    // negative
    ("afraid", -2.2),
    ("angry", -2.3),
    ("anxiety", -0.7),
    ("anxious", -1.0),
    ("bad", -2.5),
    ("bankrupt", -2.6),
    ("broke", -1.8),
    ("burden", -1.9),
    ("complicated", -0.9),
    ("crisis", -3.1),
    ("debt", -1.5),
    ("debts", -1.3),
    ("depressed", -2.3),
    ("desperate", -1.3),
    ("difficult", -1.5),
    ("difficulties", -1.2),
    ("difficulty", -1.4),
    ("disappointed", -1.9),
    ("doubt", -1.5),
    ("expensive", -0.9),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fear", -2.2),
    ("frustrated", -2.4),
    ("hard", -0.4),
    ("hate", -2.7),
    ("hopeless", -2.0),
    ("impossible", -1.4),
    ("lack", -1.3),
    ("late", -0.7),
    ("lose", -1.7),
    ("losing", -1.6),
    ("loss", -1.3),
    ("losses", -1.7),
    ("lost", -1.3),
    ("nervous", -1.1),
    ("overwhelmed", -1.5),
    ("panic", -2.3),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("risk", -1.1),
    ("risky", -1.4),
    ("sad", -2.1),
    ("scared", -1.9),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("struggle", -1.5),
    ("struggling", -1.8),
    ("terrible", -2.1),
    ("tired", -1.9),
    ("trouble", -1.7),
    ("unable", -1.2),
    ("uncomfortable", -1.6),
    ("uncertain", -1.2),
    ("unemployed", -2.1),
    ("unfortunately", -1.4),
    ("upset", -1.6),
    ("weak", -1.9),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
];

/// Intensifiers (positive) and dampeners (negative) applied to the next words.
pub const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("completely", 0.293),
    ("deeply", 0.293),
    ("enormously", 0.293),
    ("especially", 0.293),
    ("extremely", 0.293),
    ("fully", 0.293),
    ("greatly", 0.293),
    ("highly", 0.293),
    ("incredibly", 0.293),
    ("more", 0.293),
    ("most", 0.293),
    ("particularly", 0.293),
    ("really", 0.293),
    ("so", 0.293),
    ("too", 0.293),
    ("totally", 0.293),
    ("truly", 0.293),
    ("very", 0.293),
    ("almost", -0.293),
    ("barely", -0.293),
    ("hardly", -0.293),
    ("kinda", -0.293),
    ("less", -0.293),
    ("little", -0.293),
    ("marginally", -0.293),
    ("partly", -0.293),
    ("scarcely", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
];

pub const NEGATIONS: &[&str] = &[
    "aint", "ain't", "cannot", "cant", "can't", "didnt", "didn't", "doesnt", "doesn't", "dont",
    "don't", "hasnt", "hasn't", "havent", "haven't", "isnt", "isn't", "neither", "never", "no",
    "nobody", "none", "nor", "not", "nothing", "nowhere", "shouldnt", "shouldn't", "wasnt",
    "wasn't", "without", "wont", "won't", "wouldnt", "wouldn't",
];

/// Lookup tables built once per scorer.
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
}

impl Lexicon {
    pub fn english() -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
        }
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        NEGATIONS.contains(&word)
    }
}
