use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A generated multiple-choice question. `correct_answer` must equal exactly
/// one of `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// One answered question inside a stored assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    /// `None` when the question was skipped.
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub explanation: String,
}

/// A completed quiz attempt. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Percentage of correct answers, 0–100.
    pub quiz_score: f64,
    pub questions: Json<Vec<QuestionResult>>,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for appending an assessment.
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub quiz_score: f64,
    pub questions: Vec<QuestionResult>,
    pub category: String,
}
