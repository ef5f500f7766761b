// src/scoring/question.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// The closed set of question types an assignment may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    Identification,
    ProblemSolving,
    Enumeration,
    FillInTheBlanks,
    YesNo,
    Essay,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 7] = [
        QuestionKind::MultipleChoice,
        QuestionKind::Identification,
        QuestionKind::ProblemSolving,
        QuestionKind::Enumeration,
        QuestionKind::FillInTheBlanks,
        QuestionKind::YesNo,
        QuestionKind::Essay,
    ];

    /// Storage tag, as written in the `questions.question_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::Identification => "identification",
            QuestionKind::ProblemSolving => "problem_solving",
            QuestionKind::Enumeration => "enumeration",
            QuestionKind::FillInTheBlanks => "fill_in_the_blanks",
            QuestionKind::YesNo => "yes_no",
            QuestionKind::Essay => "essay",
        }
    }

    /// Whether the client renders a fixed option list for this kind.
    pub fn has_options(self) -> bool {
        matches!(self, QuestionKind::MultipleChoice | QuestionKind::YesNo)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = ScoringError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        QuestionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ScoringError::Configuration(format!("unknown question type '{tag}'")))
    }
}

/// A question together with its answer key, ready to be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub kind: QuestionKind,
    pub points: u32,
    /// Accepted answers in authoring order. Order matters for fill-in-the-blanks.
    pub accepted_answers: Vec<String>,
}

impl Question {
    pub fn new(id: i64, kind: QuestionKind, points: u32, accepted_answers: Vec<String>) -> Self {
        Self {
            id,
            kind,
            points,
            accepted_answers,
        }
    }

    /// Builds a question from raw stored values, rejecting unknown type tags
    /// and negative point values.
    pub fn from_stored(
        id: i64,
        type_tag: &str,
        points: i32,
        accepted_answers: Vec<String>,
    ) -> Result<Self, ScoringError> {
        let kind = type_tag.parse::<QuestionKind>()?;
        let points = u32::try_from(points).map_err(|_| {
            ScoringError::Configuration(format!("question {id} has negative points ({points})"))
        })?;

        Ok(Self::new(id, kind, points, accepted_answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_parses_back_to_its_kind() {
        for kind in QuestionKind::ALL {
            assert_eq!(kind.as_str().parse::<QuestionKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_tag_is_a_configuration_error() {
        let err = "matching".parse::<QuestionKind>().unwrap_err();
        assert!(matches!(err, ScoringError::Configuration(_)));

        // Tags are exact: no case folding.
        assert!("Essay".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn serde_uses_storage_tags() {
        let json = serde_json::to_string(&QuestionKind::FillInTheBlanks).unwrap();
        assert_eq!(json, "\"fill_in_the_blanks\"");

        let kind: QuestionKind = serde_json::from_str("\"yes_no\"").unwrap();
        assert_eq!(kind, QuestionKind::YesNo);
    }

    #[test]
    fn from_stored_rejects_negative_points() {
        let err = Question::from_stored(3, "essay", -1, vec![]).unwrap_err();
        assert_eq!(
            err,
            ScoringError::Configuration("question 3 has negative points (-1)".to_string())
        );

        let ok = Question::from_stored(3, "identification", 5, vec!["Rome".into()]).unwrap();
        assert_eq!(ok.kind, QuestionKind::Identification);
        assert_eq!(ok.points, 5);
    }
}
