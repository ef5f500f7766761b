// src/models/question.rs

use serde::Serialize;
use sqlx::prelude::FromRow;

use crate::{error::ScoringError, scoring::Question};

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub assignment_id: i64,

    /// The text content of the question.
    pub question_text: String,

    /// Storage tag such as 'multiple_choice' or 'fill_in_the_blanks'.
    /// Parsed into `QuestionKind` before scoring.
    pub question_type: String,

    pub points: i32,

    pub help_video_url: Option<String>,
}

/// Helper struct for fetching answer keys from the 'correct_answers' table.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerKeyRow {
    pub question_id: i64,
    pub answer_text: String,
}

/// Represents the 'question_options' table (choices shown to the student).
#[derive(Debug, Clone, FromRow)]
pub struct OptionRow {
    pub question_id: i64,
    pub option_text: String,
}

impl QuestionRow {
    /// Attaches the answer key and validates the stored type tag and points.
    pub fn into_scorable(self, accepted_answers: Vec<String>) -> Result<Question, ScoringError> {
        Question::from_stored(self.id, &self.question_type, self.points, accepted_answers)
    }
}

/// DTO for sending a question to the game client (excludes answer key text).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question_text: String,
    pub question_type: String,
    pub points: i32,
    pub help_video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Set alongside `options` for multiple-choice and yes/no questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer_index: Option<usize>,
}
