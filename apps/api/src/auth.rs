//! Caller identity. The identity provider (or the gateway in front of this
//! service) verifies the session and forwards the subject id in a header;
//! this module only reads it and resolves the owning user row.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;
use crate::store::Store;

/// A verified subject id. Extraction fails with `Unauthorized` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(pub String);

#[async_trait]
impl FromRequestParts<AppState> for Subject {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        parts
            .headers
            .get(state.config.auth_subject_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Subject(s.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}

/// Resolves the subject to its user row; a verified caller without one is
/// `UserNotFound`.
pub async fn resolve_user(store: &dyn Store, subject: &Subject) -> Result<User, AppError> {
    store
        .find_user_by_subject(&subject.0)
        .await?
        .ok_or(AppError::UserNotFound)
}
