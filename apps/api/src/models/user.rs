use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    /// Subject id issued by the identity provider.
    pub subject_id: String,
    /// `None` until onboarding completes.
    pub industry: Option<String>,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_onboarded(&self) -> bool {
        self.industry.is_some()
    }
}

/// Profile fields written by the onboarding step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub industry: String,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}
