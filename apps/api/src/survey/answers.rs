use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single value captured by the registration form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Text(String),
    /// One option out of the field's fixed option set (see `survey::fields`).
    Choice(String),
    Number(f64),
    Flag(bool),
    Date(NaiveDate),
}

impl Answer {
    /// Human-readable rendering used in transcripts and downstream payloads.
    pub fn display_value(&self) -> String {
        match self {
            Answer::Text(text) | Answer::Choice(text) => text.clone(),
            Answer::Number(value) => {
                if value.fract() == 0.0 {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
            Answer::Flag(true) => "yes".to_string(),
            Answer::Flag(false) => "no".to_string(),
            Answer::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// One keyed entry of an `AnswerSet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub key: String,
    pub answer: Answer,
}

/// All answers of one submission, in the order the form produced them.
///
/// Keys are unique: inserting an existing key replaces its answer in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<AnswerEntry>", into = "Vec<AnswerEntry>")]
pub struct AnswerSet {
    entries: Vec<AnswerEntry>,
}

impl From<Vec<AnswerEntry>> for AnswerSet {
    /// A repeated key keeps its first position and its last answer.
    fn from(entries: Vec<AnswerEntry>) -> Self {
        let mut set = Self::default();
        for entry in entries {
            set.insert(entry.key, entry.answer);
        }
        set
    }
}

impl From<AnswerSet> for Vec<AnswerEntry> {
    fn from(set: AnswerSet) -> Self {
        set.entries
    }
}

impl AnswerSet {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, answer: Answer) {
        let key = key.into();
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.answer = answer,
            None => self.entries.push(AnswerEntry { key, answer }),
        }
    }

    /// Builder-style `insert`, handy for fixtures.
    #[cfg(test)]
    pub fn with(mut self, key: impl Into<String>, answer: Answer) -> Self {
        self.insert(key, answer);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.answer)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Answer::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(Answer::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(Answer::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnswerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
