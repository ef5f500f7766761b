// src/handlers/assignment.rs

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        assignment::{AssignmentInfo, AssignmentResponse, AssignmentRow},
        question::{AnswerKeyRow, OptionRow, PublicQuestion, QuestionRow},
    },
    scoring::{Question, QuestionKind},
};

/// Loads an assignment together with its class archive flag.
pub(crate) async fn fetch_assignment(
    pool: &PgPool,
    assignment_id: i64,
) -> Result<AssignmentRow, AppError> {
    let assignment = sqlx::query_as::<_, AssignmentRow>(
        r#"
        SELECT
            a.id,
            a.class_id,
            a.title,
            a.description,
            a.is_archived,
            c.is_archived AS class_archived
        FROM assignments a
        JOIN classes c ON c.id = a.class_id
        WHERE a.id = $1
        "#,
    )
    .bind(assignment_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch assignment {}: {:?}", assignment_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    assignment.ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))
}

async fn fetch_question_rows(
    pool: &PgPool,
    assignment_id: i64,
) -> Result<Vec<QuestionRow>, AppError> {
    sqlx::query_as::<_, QuestionRow>(
        r#"
        SELECT id, assignment_id, question_text, question_type, points, help_video_url
        FROM questions
        WHERE assignment_id = $1
        ORDER BY id
        "#,
    )
    .bind(assignment_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })
}

/// Answer keys for every question of the assignment, in authoring order.
async fn fetch_answer_keys(
    pool: &PgPool,
    assignment_id: i64,
) -> Result<HashMap<i64, Vec<String>>, AppError> {
    let keys = sqlx::query_as::<_, AnswerKeyRow>(
        r#"
        SELECT ca.question_id, ca.answer_text
        FROM correct_answers ca
        JOIN questions q ON q.id = ca.question_id
        WHERE q.assignment_id = $1
        ORDER BY ca.id
        "#,
    )
    .bind(assignment_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch answer keys: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(group_by_question(
        keys.into_iter().map(|k| (k.question_id, k.answer_text)),
    ))
}

/// Loads the assignment's questions in id order, each with its answer key in
/// authoring order, ready for the scorer.
pub(crate) async fn load_scorable_questions(
    pool: &PgPool,
    assignment_id: i64,
) -> Result<Vec<Question>, AppError> {
    let rows = fetch_question_rows(pool, assignment_id).await?;
    let mut keys_by_question = fetch_answer_keys(pool, assignment_id).await?;

    let questions = rows
        .into_iter()
        .map(|row| {
            let accepted = keys_by_question.remove(&row.id).unwrap_or_default();
            row.into_scorable(accepted)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(questions)
}

fn group_by_question(pairs: impl Iterator<Item = (i64, String)>) -> HashMap<i64, Vec<String>> {
    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
    for (question_id, text) in pairs {
        grouped.entry(question_id).or_default().push(text);
    }
    grouped
}

/// Position of the correct option as the game client expects it.
///
/// Multiple choice points at the first option that is any accepted answer.
/// Yes/no points at the option equal to the first accepted answer. Falls back
/// to 0 when nothing matches.
fn correct_option_index(kind: QuestionKind, options: &[String], accepted: &[String]) -> usize {
    let position = match kind {
        QuestionKind::YesNo => accepted
            .first()
            .and_then(|answer| options.iter().position(|option| option == answer)),
        _ => options.iter().position(|option| accepted.contains(option)),
    };
    position.unwrap_or(0)
}

/// Returns an assignment for the game client.
///
/// Answer key text is never sent. Multiple-choice and yes/no questions carry
/// their option list and the index of the correct option.
pub async fn get_assignment(
    State(pool): State<PgPool>,
    Path(assignment_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = fetch_assignment(&pool, assignment_id).await?;
    if assignment.is_closed() {
        return Err(AppError::Forbidden("Assignment is archived".to_string()));
    }

    let rows = fetch_question_rows(&pool, assignment_id).await?;

    let options = sqlx::query_as::<_, OptionRow>(
        r#"
        SELECT o.question_id, o.option_text
        FROM question_options o
        JOIN questions q ON q.id = o.question_id
        WHERE q.assignment_id = $1
        ORDER BY o.id
        "#,
    )
    .bind(assignment_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch question options: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let mut options_by_question =
        group_by_question(options.into_iter().map(|o| (o.question_id, o.option_text)));
    let keys_by_question = fetch_answer_keys(&pool, assignment_id).await?;

    let total_points: i64 = rows.iter().map(|q| i64::from(q.points)).sum();
    let question_count = rows.len();

    let mut questions = Vec::with_capacity(rows.len());
    for row in rows {
        let kind = row.question_type.parse::<QuestionKind>()?;
        let options = kind
            .has_options()
            .then(|| options_by_question.remove(&row.id).unwrap_or_default());
        let correct_answer_index = options.as_deref().map(|options| {
            let accepted = keys_by_question
                .get(&row.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            correct_option_index(kind, options, accepted)
        });

        questions.push(PublicQuestion {
            id: row.id,
            question_text: row.question_text,
            question_type: kind.to_string(),
            points: row.points,
            help_video_url: row.help_video_url,
            options,
            correct_answer_index,
        });
    }

    Ok(Json(AssignmentResponse {
        status: "success",
        assignment: AssignmentInfo {
            id: assignment.id,
            title: assignment.title,
            description: assignment.description,
            total_points,
            question_count,
        },
        questions,
    }))
}
