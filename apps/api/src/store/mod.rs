//! Persistence gateway — the narrow record-level interface every workflow
//! goes through. `AppState` carries an `Arc<dyn Store>`; production uses
//! `PgStore`, tests use the in-memory store.
//!
//! Every operation is a single atomic row write or a plain read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::assessment::{Assessment, NewAssessment};
use crate::models::insight::{IndustryInsight, InsightReport};
use crate::models::resume::Resume;
use crate::models::user::{ProfileUpdate, User};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced owner row does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be decoded into its domain type.
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".to_string()),
            // 23503: foreign_key_violation — the owning row is missing
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
                StoreError::NotFound(db.message().to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Corrupt(e.to_string())
            }
            _ => StoreError::Unavailable(e.to_string()),
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    // === Users ===

    async fn find_user_by_subject(&self, subject_id: &str) -> Result<Option<User>, StoreError>;

    /// Returns the user for `subject_id`, creating the row on first access.
    async fn ensure_user(&self, subject_id: &str) -> Result<User, StoreError>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        profile: &ProfileUpdate,
    ) -> Result<User, StoreError>;

    // === Resumes ===

    async fn get_resume(&self, user_id: Uuid) -> Result<Option<Resume>, StoreError>;

    /// Creates or wholesale overwrites the user's single resume.
    async fn upsert_resume(&self, user_id: Uuid, content: &str) -> Result<Resume, StoreError>;

    // === Industry insights ===

    async fn get_insight(&self, industry: &str) -> Result<Option<IndustryInsight>, StoreError>;

    /// Inserts the insight row for `industry`. If a concurrent writer got
    /// there first, this write overwrites it.
    async fn create_insight(
        &self,
        industry: &str,
        report: &InsightReport,
        now: DateTime<Utc>,
        next_update: DateTime<Utc>,
    ) -> Result<IndustryInsight, StoreError>;

    /// Refreshes an existing row in place. `NotFound` if absent.
    async fn replace_insight(
        &self,
        industry: &str,
        report: &InsightReport,
        now: DateTime<Utc>,
        next_update: DateTime<Utc>,
    ) -> Result<IndustryInsight, StoreError>;

    // === Assessments ===

    async fn append_assessment(
        &self,
        user_id: Uuid,
        record: &NewAssessment,
    ) -> Result<Assessment, StoreError>;

    /// All assessments for the user, oldest first.
    async fn list_assessments(&self, user_id: Uuid) -> Result<Vec<Assessment>, StoreError>;
}
