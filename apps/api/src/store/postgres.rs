use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::assessment::{Assessment, NewAssessment};
use crate::models::insight::{IndustryInsight, IndustryInsightRow, InsightReport};
use crate::models::resume::Resume;
use crate::models::user::{ProfileUpdate, User};
use crate::store::{Store, StoreError};

/// `Store` backed by the shared PostgreSQL pool created at startup.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn require_user(&self, user_id: Uuid) -> Result<(), StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        if exists {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("User {user_id} not found")))
        }
    }
}

fn into_insight(row: IndustryInsightRow) -> Result<IndustryInsight, StoreError> {
    IndustryInsight::try_from(row).map_err(StoreError::Corrupt)
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_subject(&self, subject_id: &str) -> Result<Option<User>, StoreError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE subject_id = $1")
                .bind(subject_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn ensure_user(&self, subject_id: &str) -> Result<User, StoreError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        Ok(sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, subject_id)
            VALUES ($1, $2)
            ON CONFLICT (subject_id) DO UPDATE SET subject_id = EXCLUDED.subject_id
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        profile: &ProfileUpdate,
    ) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET industry = $2, experience = $3, bio = $4, skills = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&profile.industry)
        .bind(profile.experience)
        .bind(&profile.bio)
        .bind(&profile.skills)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("User {user_id} not found")))
    }

    async fn get_resume(&self, user_id: Uuid) -> Result<Option<Resume>, StoreError> {
        self.require_user(user_id).await?;
        Ok(
            sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn upsert_resume(&self, user_id: Uuid, content: &str) -> Result<Resume, StoreError> {
        Ok(sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (id, user_id, content)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET content = EXCLUDED.content, updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_insight(&self, industry: &str) -> Result<Option<IndustryInsight>, StoreError> {
        sqlx::query_as::<_, IndustryInsightRow>(
            "SELECT * FROM industry_insights WHERE industry = $1",
        )
        .bind(industry)
        .fetch_optional(&self.pool)
        .await?
        .map(into_insight)
        .transpose()
    }

    async fn create_insight(
        &self,
        industry: &str,
        report: &InsightReport,
        now: DateTime<Utc>,
        next_update: DateTime<Utc>,
    ) -> Result<IndustryInsight, StoreError> {
        let row = sqlx::query_as::<_, IndustryInsightRow>(
            r#"
            INSERT INTO industry_insights
                (id, industry, salary_ranges, growth_rate, demand_level, top_skills,
                 market_outlook, key_trends, recommended_skills, last_updated, next_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (industry) DO UPDATE SET
                salary_ranges = EXCLUDED.salary_ranges,
                growth_rate = EXCLUDED.growth_rate,
                demand_level = EXCLUDED.demand_level,
                top_skills = EXCLUDED.top_skills,
                market_outlook = EXCLUDED.market_outlook,
                key_trends = EXCLUDED.key_trends,
                recommended_skills = EXCLUDED.recommended_skills,
                last_updated = EXCLUDED.last_updated,
                next_update = EXCLUDED.next_update
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(industry)
        .bind(Json(&report.salary_ranges))
        .bind(report.growth_rate)
        .bind(report.demand_level.as_str())
        .bind(&report.top_skills)
        .bind(report.market_outlook.as_str())
        .bind(&report.key_trends)
        .bind(&report.recommended_skills)
        .bind(now)
        .bind(next_update)
        .fetch_one(&self.pool)
        .await?;

        into_insight(row)
    }

    async fn replace_insight(
        &self,
        industry: &str,
        report: &InsightReport,
        now: DateTime<Utc>,
        next_update: DateTime<Utc>,
    ) -> Result<IndustryInsight, StoreError> {
        let row = sqlx::query_as::<_, IndustryInsightRow>(
            r#"
            UPDATE industry_insights
            SET salary_ranges = $2, growth_rate = $3, demand_level = $4, top_skills = $5,
                market_outlook = $6, key_trends = $7, recommended_skills = $8,
                last_updated = $9, next_update = $10
            WHERE industry = $1
            RETURNING *
            "#,
        )
        .bind(industry)
        .bind(Json(&report.salary_ranges))
        .bind(report.growth_rate)
        .bind(report.demand_level.as_str())
        .bind(&report.top_skills)
        .bind(report.market_outlook.as_str())
        .bind(&report.key_trends)
        .bind(&report.recommended_skills)
        .bind(now)
        .bind(next_update)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Insight for '{industry}' not found")))?;

        into_insight(row)
    }

    async fn append_assessment(
        &self,
        user_id: Uuid,
        record: &NewAssessment,
    ) -> Result<Assessment, StoreError> {
        Ok(sqlx::query_as::<_, Assessment>(
            r#"
            INSERT INTO assessments (id, user_id, quiz_score, questions, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(record.quiz_score)
        .bind(Json(&record.questions))
        .bind(&record.category)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_assessments(&self, user_id: Uuid) -> Result<Vec<Assessment>, StoreError> {
        self.require_user(user_id).await?;
        Ok(sqlx::query_as::<_, Assessment>(
            "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
