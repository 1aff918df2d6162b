pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::insights::handlers as insights;
use crate::quiz::handlers as quiz;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users & onboarding
        .route("/api/v1/users/me", get(users::handle_get_me))
        .route(
            "/api/v1/users/me/onboarding",
            get(users::handle_onboarding_status).put(users::handle_complete_onboarding),
        )
        // Resume
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume).put(resume::handle_save_resume),
        )
        .route("/api/v1/resume/improve", post(resume::handle_improve))
        // Industry insights
        .route("/api/v1/insights", get(insights::handle_get_insights))
        // Interview quiz
        .route("/api/v1/quiz", post(quiz::handle_generate_quiz))
        .route(
            "/api/v1/assessments",
            get(quiz::handle_list_assessments).post(quiz::handle_save_result),
        )
        .with_state(state)
}
