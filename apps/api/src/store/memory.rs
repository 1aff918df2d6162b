//! In-memory `Store` used by unit tests. Mirrors the PostgreSQL adapter's
//! semantics: owner rows must exist, resumes overwrite, assessments append.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::assessment::{Assessment, NewAssessment};
use crate::models::insight::{IndustryInsight, InsightReport};
use crate::models::resume::Resume;
use crate::models::user::{ProfileUpdate, User};
use crate::store::{Store, StoreError};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    resumes: HashMap<Uuid, Resume>,
    insights: HashMap<String, IndustryInsight>,
    assessments: Vec<Assessment>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
    insight_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn insight_writes(&self) -> usize {
        self.insight_writes.load(Ordering::SeqCst)
    }

    /// Seeds an insight row directly, bypassing the write counter.
    pub fn seed_insight(&self, insight: IndustryInsight) {
        self.tables
            .lock()
            .unwrap()
            .insights
            .insert(insight.industry.clone(), insight);
    }

    pub fn assessment_count(&self) -> usize {
        self.tables.lock().unwrap().assessments.len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn require_user(tables: &Tables, user_id: Uuid) -> Result<(), StoreError> {
        if tables.users.iter().any(|u| u.id == user_id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("User {user_id} not found")))
        }
    }
}

fn build_insight(
    id: Uuid,
    industry: &str,
    report: &InsightReport,
    now: DateTime<Utc>,
    next_update: DateTime<Utc>,
) -> IndustryInsight {
    IndustryInsight {
        id,
        industry: industry.to_string(),
        report: report.clone(),
        last_updated: now,
        next_update,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_subject(&self, subject_id: &str) -> Result<Option<User>, StoreError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.subject_id == subject_id)
            .cloned())
    }

    async fn ensure_user(&self, subject_id: &str) -> Result<User, StoreError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter().find(|u| u.subject_id == subject_id) {
            return Ok(user.clone());
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            subject_id: subject_id.to_string(),
            industry: None,
            experience: None,
            bio: None,
            skills: vec![],
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        profile: &ProfileUpdate,
    ) -> Result<User, StoreError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::NotFound(format!("User {user_id} not found")))?;
        user.industry = Some(profile.industry.clone());
        user.experience = profile.experience;
        user.bio = profile.bio.clone();
        user.skills = profile.skills.clone();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn get_resume(&self, user_id: Uuid) -> Result<Option<Resume>, StoreError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Self::require_user(&tables, user_id)?;
        Ok(tables.resumes.get(&user_id).cloned())
    }

    async fn upsert_resume(&self, user_id: Uuid, content: &str) -> Result<Resume, StoreError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        Self::require_user(&tables, user_id)?;
        let now = Utc::now();
        let resume = tables
            .resumes
            .entry(user_id)
            .and_modify(|r| {
                r.content = content.to_string();
                r.updated_at = now;
            })
            .or_insert_with(|| Resume {
                id: Uuid::new_v4(),
                user_id,
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            });
        Ok(resume.clone())
    }

    async fn get_insight(&self, industry: &str) -> Result<Option<IndustryInsight>, StoreError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().insights.get(industry).cloned())
    }

    async fn create_insight(
        &self,
        industry: &str,
        report: &InsightReport,
        now: DateTime<Utc>,
        next_update: DateTime<Utc>,
    ) -> Result<IndustryInsight, StoreError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let id = tables
            .insights
            .get(industry)
            .map(|i| i.id)
            .unwrap_or_else(Uuid::new_v4);
        let insight = build_insight(id, industry, report, now, next_update);
        tables.insights.insert(industry.to_string(), insight.clone());
        self.insight_writes.fetch_add(1, Ordering::SeqCst);
        Ok(insight)
    }

    async fn replace_insight(
        &self,
        industry: &str,
        report: &InsightReport,
        now: DateTime<Utc>,
        next_update: DateTime<Utc>,
    ) -> Result<IndustryInsight, StoreError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let existing = tables
            .insights
            .get_mut(industry)
            .ok_or_else(|| StoreError::NotFound(format!("Insight for '{industry}' not found")))?;
        *existing = build_insight(existing.id, industry, report, now, next_update);
        self.insight_writes.fetch_add(1, Ordering::SeqCst);
        Ok(existing.clone())
    }

    async fn append_assessment(
        &self,
        user_id: Uuid,
        record: &NewAssessment,
    ) -> Result<Assessment, StoreError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        Self::require_user(&tables, user_id)?;
        // Strictly increasing timestamps keep creation order observable.
        let created_at = tables
            .assessments
            .last()
            .map(|a| a.created_at + Duration::microseconds(1))
            .map_or_else(Utc::now, |floor| floor.max(Utc::now()));
        let assessment = Assessment {
            id: Uuid::new_v4(),
            user_id,
            quiz_score: record.quiz_score,
            questions: Json(record.questions.clone()),
            category: record.category.clone(),
            created_at,
        };
        tables.assessments.push(assessment.clone());
        Ok(assessment)
    }

    async fn list_assessments(&self, user_id: Uuid) -> Result<Vec<Assessment>, StoreError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Self::require_user(&tables, user_id)?;
        Ok(tables
            .assessments
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_user_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.ensure_user("subj_1").await.unwrap();
        let second = store.ensure_user("subj_1").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_upsert_resume_requires_owner() {
        let store = MemoryStore::new();
        let err = store.upsert_resume(Uuid::new_v4(), "# CV").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reads_for_unknown_owner_are_not_found() {
        let store = MemoryStore::new();
        let ghost = Uuid::new_v4();
        assert!(matches!(
            store.get_resume(ghost).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.list_assessments(ghost).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_resume_empty_for_known_owner() {
        let store = MemoryStore::new();
        let user = store.ensure_user("subj_2").await.unwrap();
        assert!(store.get_resume(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let err = store.find_user_by_subject("subj_1").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
