//! Axum route handlers for the Users API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::{resolve_user, Subject};
use crate::errors::AppError;
use crate::models::user::{ProfileUpdate, User};
use crate::state::AppState;
use crate::users::onboarding::complete_onboarding;

#[derive(Debug, Serialize)]
pub struct OnboardingStatus {
    pub is_onboarded: bool,
}

/// GET /api/v1/users/me
///
/// First authenticated access creates the user row.
pub async fn handle_get_me(
    State(state): State<AppState>,
    subject: Subject,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.store.ensure_user(&subject.0).await?))
}

/// GET /api/v1/users/me/onboarding
pub async fn handle_onboarding_status(
    State(state): State<AppState>,
    subject: Subject,
) -> Result<Json<OnboardingStatus>, AppError> {
    let user = resolve_user(state.store.as_ref(), &subject).await?;
    Ok(Json(OnboardingStatus {
        is_onboarded: user.is_onboarded(),
    }))
}

/// PUT /api/v1/users/me/onboarding
pub async fn handle_complete_onboarding(
    State(state): State<AppState>,
    subject: Subject,
    Json(profile): Json<ProfileUpdate>,
) -> Result<Json<User>, AppError> {
    let user = resolve_user(state.store.as_ref(), &subject).await?;
    let updated =
        complete_onboarding(state.store.as_ref(), &state.insights, &user, profile).await?;
    Ok(Json(updated))
}
