// src/handlers/leaderboard.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    config::GameSettings,
    error::AppError,
    models::{
        assignment::ClassRow,
        submission::{LeaderboardResponse, SubmissionSummaryRow},
    },
    scoring::{SubmissionSummary, leaderboard},
};

/// Retrieves the class leaderboard, recomputed from every stored submission.
pub async fn get_class_leaderboard(
    State(pool): State<PgPool>,
    State(game): State<GameSettings>,
    Path(class_code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let class = sqlx::query_as::<_, ClassRow>(
        "SELECT id, name, section, class_code, is_archived FROM classes WHERE class_code = $1",
    )
    .bind(&class_code)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

    // Insertion order decides who comes first among equal scores.
    let rows = sqlx::query_as::<_, SubmissionSummaryRow>(
        r#"
        SELECT
            s.student_id,
            COALESCE(st.name, 'Unknown') AS student_name,
            s.score,
            s.total_points
        FROM assignment_submissions s
        JOIN assignments a ON a.id = s.assignment_id
        LEFT JOIN students st ON st.id = s.student_id
        WHERE a.class_id = $1
        ORDER BY s.id
        "#,
    )
    .bind(class.id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch submissions for class {}: {:?}", class_code, e);
        AppError::InternalServerError(e.to_string())
    })?;

    let submissions: Vec<SubmissionSummary> = rows.into_iter().map(Into::into).collect();
    let entries = leaderboard(&submissions, game.leaderboard_size);

    Ok(Json(LeaderboardResponse {
        status: "success",
        class_info: class.into(),
        leaderboard: entries,
    }))
}
