//! Axum route handlers for the Quiz API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{resolve_user, Subject};
use crate::errors::AppError;
use crate::models::assessment::{Assessment, QuizQuestion};
use crate::quiz::workflow::{generate_quiz, list_assessments, save_result};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct SaveResultRequest {
    pub questions: Vec<QuizQuestion>,
    /// One entry per question; `null` for a skipped question.
    pub answers: Vec<Option<String>>,
    /// Score as computed by the client. Checked, not trusted.
    pub score: f64,
}

/// POST /api/v1/quiz
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    subject: Subject,
) -> Result<Json<QuizResponse>, AppError> {
    let user = resolve_user(state.store.as_ref(), &subject).await?;
    let questions = generate_quiz(state.llm.as_ref(), &user).await?;
    Ok(Json(QuizResponse { questions }))
}

/// POST /api/v1/assessments
pub async fn handle_save_result(
    State(state): State<AppState>,
    subject: Subject,
    Json(request): Json<SaveResultRequest>,
) -> Result<(StatusCode, Json<Assessment>), AppError> {
    let user = resolve_user(state.store.as_ref(), &subject).await?;
    let assessment = save_result(
        state.store.as_ref(),
        &user,
        &request.questions,
        &request.answers,
        request.score,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

/// GET /api/v1/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    subject: Subject,
) -> Result<Json<Vec<Assessment>>, AppError> {
    let user = resolve_user(state.store.as_ref(), &subject).await?;
    Ok(Json(list_assessments(state.store.as_ref(), &user).await?))
}
