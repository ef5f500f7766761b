// src/scoring/answers.rs

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::ScoringError;

/// Raw answers submitted for one assignment, keyed by question id.
///
/// Fill-in-the-blanks answers stay as a single `|`-joined string here; splitting
/// happens in the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedAnswers {
    answers: HashMap<i64, String>,
}

impl SubmittedAnswers {
    /// Parses the `answers` object of a submission request.
    ///
    /// Keys must be integer question ids. Values must be strings or `null`
    /// (`null` means unanswered).
    pub fn from_json_map(raw: &Map<String, Value>) -> Result<Self, ScoringError> {
        let mut answers = HashMap::with_capacity(raw.len());

        for (key, value) in raw {
            let question_id = key.trim().parse::<i64>().map_err(|_| {
                ScoringError::InvalidSubmission(format!("'{key}' is not a question id"))
            })?;

            match value {
                Value::Null => {}
                Value::String(text) => {
                    answers.insert(question_id, text.clone());
                }
                other => {
                    return Err(ScoringError::InvalidSubmission(format!(
                        "answer for question {question_id} must be a string, got {other}"
                    )));
                }
            }
        }

        Ok(Self { answers })
    }

    /// The submitted answer, or `None` when the question was left unanswered.
    /// An empty string counts as unanswered.
    pub fn get(&self, question_id: i64) -> Option<&str> {
        self.answers
            .get(&question_id)
            .map(String::as_str)
            .filter(|answer| !answer.is_empty())
    }

    pub fn question_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.answers.keys().copied()
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for SubmittedAnswers {
    fn from_iter<T: IntoIterator<Item = (i64, S)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().map(|(id, a)| (id, a.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<SubmittedAnswers, ScoringError> {
        match value {
            Value::Object(map) => SubmittedAnswers::from_json_map(&map),
            _ => unreachable!("test input must be an object"),
        }
    }

    #[test]
    fn parses_string_keys_and_values() {
        let answers = parse(json!({"1": "Paris", "2": "paris|france", "3": null})).unwrap();

        assert_eq!(answers.get(1), Some("Paris"));
        assert_eq!(answers.get(2), Some("paris|france"));
        assert_eq!(answers.get(3), None);
        let mut ids: Vec<i64> = answers.question_ids().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn empty_string_is_unanswered() {
        let answers = parse(json!({"7": ""})).unwrap();
        assert_eq!(answers.get(7), None);
    }

    #[test]
    fn whitespace_is_still_an_answer() {
        let answers = parse(json!({"7": "  "})).unwrap();
        assert_eq!(answers.get(7), Some("  "));
    }

    #[test]
    fn non_numeric_key_is_rejected() {
        let err = parse(json!({"q1": "A"})).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidSubmission("'q1' is not a question id".to_string())
        );

        assert!(parse(json!({"": "A"})).is_err());
    }

    #[test]
    fn non_string_value_is_rejected() {
        assert!(matches!(
            parse(json!({"1": 4})),
            Err(ScoringError::InvalidSubmission(_))
        ));
        assert!(matches!(
            parse(json!({"1": ["paris", "france"]})),
            Err(ScoringError::InvalidSubmission(_))
        ));
    }
}
