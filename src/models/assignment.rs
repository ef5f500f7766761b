// src/models/assignment.rs

use serde::Serialize;
use sqlx::FromRow;

use crate::models::question::PublicQuestion;

/// Represents the 'classes' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct ClassRow {
    pub id: i64,
    /// Doubles as the subject name.
    pub name: String,
    pub section: Option<String>,
    pub class_code: String,
    pub is_archived: bool,
}

/// Represents the 'assignments' table joined with its class archive flag.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRow {
    pub id: i64,
    pub class_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_archived: bool,
    pub class_archived: bool,
}

impl AssignmentRow {
    /// Archived assignments, or assignments in an archived class, are closed.
    pub fn is_closed(&self) -> bool {
        self.is_archived || self.class_archived
    }
}

#[derive(Debug, Serialize)]
pub struct AssignmentInfo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub total_points: i64,
    pub question_count: usize,
}

/// Response for `GET /api/assignments/{id}`.
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub status: &'static str,
    pub assignment: AssignmentInfo,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Serialize)]
pub struct ClassInfo {
    pub name: String,
    pub section: Option<String>,
    pub code: String,
}

impl From<ClassRow> for ClassInfo {
    fn from(row: ClassRow) -> Self {
        Self {
            name: row.name,
            section: row.section,
            code: row.class_code,
        }
    }
}
