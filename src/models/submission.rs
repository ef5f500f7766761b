// src/models/submission.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::{
    models::assignment::ClassInfo,
    scoring::{LeaderboardEntry, LetterGrade, QuestionOutcome, SubmissionSummary},
};

/// DTO for submitting an assignment from the game client.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAssignmentRequest {
    #[validate(required(message = "Student ID is required"), range(min = 1))]
    pub student_id: Option<i64>,

    /// User's answers map.
    /// Key: Question ID (as a string)
    /// Value: the answer text, '|'-joined for fill-in-the-blanks, or null
    #[serde(default)]
    pub answers: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResults {
    pub score: u64,
    pub total_points: u64,
    pub percentage: f64,
    pub grade: LetterGrade,
    pub submission_id: i64,
    pub points_awarded: u64,
}

/// Response for `POST /api/submit/{assignment_id}`.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub status: &'static str,
    pub results: SubmissionResults,
    pub detailed_results: Vec<QuestionOutcome>,
}

/// A stored submission joined with its student's name.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionSummaryRow {
    pub student_id: i64,
    pub student_name: String,
    pub score: i64,
    pub total_points: i64,
}

impl From<SubmissionSummaryRow> for SubmissionSummary {
    fn from(row: SubmissionSummaryRow) -> Self {
        Self {
            student_id: row.student_id,
            student_name: row.student_name,
            score: row.score,
            total_points: row.total_points,
        }
    }
}

/// Response for `GET /api/leaderboard/{class_code}`.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub status: &'static str,
    pub class_info: ClassInfo,
    pub leaderboard: Vec<LeaderboardEntry>,
}
