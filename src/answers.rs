//! Answer set model
//!
//! Flat mapping of question identifier (the input's `name` attribute) to
//! the current answer value, serialized as a single JSON object blob in
//! LocalStorage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Saved answers for an in-progress exam, keyed by input name.
///
/// Backed by an ordered map so equal content always serializes to the
/// same blob regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    entries: BTreeMap<String, String>,
}

impl AnswerSet {
    /// Create an empty answer set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the answer for a question
    pub fn insert(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.entries.insert(question.into(), answer.into());
    }

    /// Current answer for a question, if any
    pub fn get(&self, question: &str) -> Option<&str> {
        self.entries.get(question).map(String::as_str)
    }

    /// Number of answered questions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no answers are recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (question, answer) pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a stored JSON blob back into an answer set
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_object() {
        let mut answers = AnswerSet::new();
        answers.insert("q1", "b");
        answers.insert("q2", "Paris");

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"q1":"b","q2":"Paris"}"#);
    }

    #[test]
    fn test_serialization_independent_of_insertion_order() {
        let mut a = AnswerSet::new();
        a.insert("q2", "x");
        a.insert("q1", "y");

        let mut b = AnswerSet::new();
        b.insert("q1", "y");
        b.insert("q2", "x");

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut answers = AnswerSet::new();
        answers.insert("q1", "c");
        answers.insert("q7", "mitochondria");

        let json = serde_json::to_string(&answers).unwrap();
        let parsed = AnswerSet::from_json(&json).unwrap();
        assert_eq!(parsed, answers);
    }

    #[test]
    fn test_insert_overwrites_previous_answer() {
        let mut answers = AnswerSet::new();
        answers.insert("q1", "a");
        answers.insert("q1", "d");

        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get("q1"), Some("d"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(AnswerSet::from_json("not json{").is_err());
        assert!(AnswerSet::from_json("[1,2,3]").is_err());
        assert!(AnswerSet::from_json(r#"{"q1":3}"#).is_err());
    }

    #[test]
    fn test_empty_set_serializes_to_empty_object() {
        let answers = AnswerSet::new();
        assert!(answers.is_empty());
        assert_eq!(serde_json::to_string(&answers).unwrap(), "{}");
    }
}
