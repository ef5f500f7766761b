// src/handlers/submission.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json as SqlJson};
use validator::Validate;

use crate::{
    config::GameSettings,
    error::AppError,
    handlers::assignment::{fetch_assignment, load_scorable_questions},
    models::submission::{SubmissionResponse, SubmissionResults, SubmitAssignmentRequest},
    scoring::{self, SubmittedAnswers, award_points},
};

fn to_db(value: u64) -> Result<i64, AppError> {
    i64::try_from(value)
        .map_err(|_| AppError::InternalServerError(format!("value {value} overflows BIGINT")))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    // Postgres error code for unique violation is 23505
    e.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

/// Scores a student's answers and records the submission.
///
/// * Validates the payload and the assignment (exists, not archived).
/// * Refuses a second submission unless multiple submissions are allowed,
///   in which case the earlier one is discarded.
/// * Persists the submission with per-question answer rows and credits
///   `award_points(score, multiplier)` to the student's running total.
pub async fn submit_assignment(
    State(pool): State<PgPool>,
    State(game): State<GameSettings>,
    Path(assignment_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let req: SubmitAssignmentRequest = serde_json::from_value(body)?;
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    let student_id = req
        .student_id
        .ok_or_else(|| AppError::BadRequest("Student ID is required".to_string()))?;
    let submitted = SubmittedAnswers::from_json_map(&req.answers)?;

    let assignment = fetch_assignment(&pool, assignment_id).await?;
    if assignment.is_closed() {
        return Err(AppError::Forbidden("Assignment is archived".to_string()));
    }

    let student_exists = sqlx::query_scalar::<_, i64>("SELECT id FROM students WHERE id = $1")
        .bind(student_id)
        .fetch_optional(&pool)
        .await?
        .is_some();
    if !student_exists {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    let questions = load_scorable_questions(&pool, assignment_id).await?;

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id FROM assignment_submissions
        WHERE assignment_id = $1 AND student_id = $2
        FOR UPDATE
        "#,
    )
    .bind(assignment_id)
    .bind(student_id)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(previous_id) = existing {
        if !game.allow_multiple_submissions {
            return Err(AppError::Conflict("Assignment already submitted".to_string()));
        }
        tracing::info!(
            "Replacing submission {} for student {} on assignment {}",
            previous_id,
            student_id,
            assignment_id
        );
        // submission_answers rows go with it (ON DELETE CASCADE)
        sqlx::query("DELETE FROM assignment_submissions WHERE id = $1")
            .bind(previous_id)
            .execute(&mut *tx)
            .await?;
    }

    let result = scoring::score(&questions, &submitted);
    if !result.ignored_answers.is_empty() {
        tracing::warn!(
            "Ignoring answers for questions {:?} not in assignment {}",
            result.ignored_answers,
            assignment_id
        );
    }

    let submission_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO assignment_submissions
            (assignment_id, student_id, score, total_points, answers_json)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(assignment_id)
    .bind(student_id)
    .bind(to_db(result.score)?)
    .bind(to_db(result.total_points)?)
    .bind(SqlJson(&req.answers))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Assignment already submitted".to_string())
        } else {
            tracing::error!("Failed to insert submission: {:?}", e);
            AppError::from(e)
        }
    })?;

    if !result.outcomes.is_empty() {
        let mut query_builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO submission_answers \
             (submission_id, question_id, answer_text, is_correct, points_earned) ",
        );
        query_builder.push_values(&result.outcomes, |mut row, outcome| {
            row.push_bind(submission_id)
                .push_bind(outcome.question_id)
                .push_bind(outcome.answer.clone())
                .push_bind(outcome.correct)
                .push_bind(i64::from(outcome.points_earned));
        });
        query_builder.build().execute(&mut *tx).await?;
    }

    let points_awarded = award_points(result.score, game.points_multiplier);
    sqlx::query(
        r#"
        UPDATE students
        SET total_points = total_points + $1,
            last_active = CURRENT_TIMESTAMP
        WHERE id = $2
        "#,
    )
    .bind(to_db(points_awarded)?)
    .bind(student_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        "Student {} scored {}/{} on assignment {} (+{} points, {} essays pending)",
        student_id,
        result.score,
        result.total_points,
        assignment_id,
        points_awarded,
        result.pending_count()
    );

    Ok(Json(SubmissionResponse {
        status: "success",
        results: SubmissionResults {
            score: result.score,
            total_points: result.total_points,
            percentage: result.percentage(),
            grade: result.grade(),
            submission_id,
            points_awarded,
        },
        detailed_results: result.outcomes,
    }))
}

#[cfg(test)]
mod tests {
    use super::to_db;

    #[test]
    fn db_conversion_rejects_overflow() {
        assert_eq!(to_db(42).unwrap(), 42);
        assert!(to_db(u64::MAX).is_err());
    }
}
