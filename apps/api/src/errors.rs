use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Nothing is recovered locally: the first failure aborts the workflow and
/// surfaces here as a distinct, named condition.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("User not found")]
    UserNotFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Onboarding required")]
    OnboardingRequired,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Data corrupt: {0}")]
    DataCorrupt(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::Unavailable(msg) => AppError::StoreUnavailable(msg),
            StoreError::Corrupt(msg) => AppError::DataCorrupt(msg),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::RateLimited(msg) => AppError::RateLimited(msg),
            other => AppError::GenerationFailed(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::UserNotFound => (
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                "No user record exists for this account".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::OnboardingRequired => (
                StatusCode::CONFLICT,
                "ONBOARDING_REQUIRED",
                "Complete onboarding to choose an industry first".to_string(),
            ),
            AppError::StoreUnavailable(msg) => {
                tracing::error!("Store unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "The data store is unavailable".to_string(),
                )
            }
            AppError::GenerationFailed(msg) => {
                tracing::error!("Generation failed: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::RateLimited(msg) => {
                tracing::warn!("Generation rate limited: {msg}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    "The AI service quota is exhausted; try again later".to_string(),
                )
            }
            AppError::DataCorrupt(msg) => {
                tracing::error!("Data corrupt: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "DATA_CORRUPT",
                    "Generated content could not be understood".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
