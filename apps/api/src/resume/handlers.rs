//! Axum route handlers for the Resume API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{resolve_user, Subject};
use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::resume::improve::{improve, save};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub current: String,
    /// Section label, e.g. "summary" or "work-experience".
    pub section: String,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub improved: String,
}

/// GET /api/v1/resume
///
/// Returns the caller's resume, or `null` if none has been saved yet.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    subject: Subject,
) -> Result<Json<Option<Resume>>, AppError> {
    let user = resolve_user(state.store.as_ref(), &subject).await?;
    Ok(Json(state.store.get_resume(user.id).await?))
}

/// PUT /api/v1/resume
pub async fn handle_save_resume(
    State(state): State<AppState>,
    subject: Subject,
    Json(request): Json<SaveResumeRequest>,
) -> Result<Json<Resume>, AppError> {
    let user = resolve_user(state.store.as_ref(), &subject).await?;
    let resume = save(state.store.as_ref(), &user, &request.content).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    subject: Subject,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let user = resolve_user(state.store.as_ref(), &subject).await?;
    let improved = improve(state.llm.as_ref(), &user, &request.current, &request.section).await?;
    Ok(Json(ImproveResponse { improved }))
}
