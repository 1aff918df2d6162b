use axum::{extract::State, Json};

use crate::auth::{resolve_user, Subject};
use crate::errors::AppError;
use crate::models::insight::IndustryInsight;
use crate::state::AppState;

/// GET /api/v1/insights
///
/// Returns the cached insight for the caller's industry, regenerating it
/// when absent or past its due timestamp.
pub async fn handle_get_insights(
    State(state): State<AppState>,
    subject: Subject,
) -> Result<Json<IndustryInsight>, AppError> {
    let user = resolve_user(state.store.as_ref(), &subject).await?;
    let industry = user.industry.ok_or(AppError::OnboardingRequired)?;
    let insight = state.insights.get(&industry).await?;
    Ok(Json(insight))
}
