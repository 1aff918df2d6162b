use tracing::info;

use crate::errors::AppError;
use crate::insights::cache::InsightCache;
use crate::models::user::{ProfileUpdate, User};
use crate::store::Store;

/// Normalizes and checks an onboarding submission.
fn validate_profile(profile: ProfileUpdate) -> Result<ProfileUpdate, AppError> {
    let industry = profile.industry.trim().to_string();
    if industry.is_empty() {
        return Err(AppError::Validation("industry cannot be empty".to_string()));
    }
    if profile.experience.is_some_and(|years| years < 0) {
        return Err(AppError::Validation(
            "experience cannot be negative".to_string(),
        ));
    }
    let skills = profile
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    let bio = profile
        .bio
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty());

    Ok(ProfileUpdate {
        industry,
        experience: profile.experience,
        bio,
        skills,
    })
}

/// Completes onboarding: makes sure the industry has an insight (generating
/// one if needed), then writes the profile in a single row update. A failed
/// generation leaves the profile untouched.
pub async fn complete_onboarding(
    store: &dyn Store,
    insights: &InsightCache,
    user: &User,
    profile: ProfileUpdate,
) -> Result<User, AppError> {
    let profile = validate_profile(profile)?;

    insights.get(&profile.industry).await?;

    let updated = store.update_profile(user.id, &profile).await?;
    info!("User {} onboarded into '{}'", user.id, profile.industry);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::scripted::ScriptedGenerator;
    use crate::store::memory::MemoryStore;

    const REPORT_JSON: &str = r#"{
        "salary_ranges": [{"role": "Nurse", "min": 60000, "max": 95000, "median": 78000, "location": "US"}],
        "growth_rate": 6.0,
        "demand_level": "High",
        "top_skills": ["Patient care"],
        "market_outlook": "Positive",
        "key_trends": ["Telehealth"],
        "recommended_skills": ["Informatics"]
    }"#;

    fn profile(industry: &str) -> ProfileUpdate {
        ProfileUpdate {
            industry: industry.to_string(),
            experience: Some(3),
            bio: Some("  ".to_string()),
            skills: vec![" Triage ".to_string(), "".to_string()],
        }
    }

    #[tokio::test]
    async fn test_onboarding_creates_insight_and_updates_profile() {
        let store = Arc::new(MemoryStore::new());
        let llm = Arc::new(ScriptedGenerator::with_text(REPORT_JSON));
        let cache = InsightCache::new(store.clone(), llm.clone());
        let user = store.ensure_user("subj_onboard").await.unwrap();

        let updated = complete_onboarding(store.as_ref(), &cache, &user, profile(" Healthcare "))
            .await
            .unwrap();

        assert_eq!(updated.industry.as_deref(), Some("Healthcare"));
        assert_eq!(updated.skills, vec!["Triage"]);
        assert_eq!(updated.bio, None);
        assert!(store.get_insight("Healthcare").await.unwrap().is_some());
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_generation_leaves_profile_untouched() {
        let store = Arc::new(MemoryStore::new());
        let llm = Arc::new(ScriptedGenerator::with_text("no json here"));
        let cache = InsightCache::new(store.clone(), llm);
        let user = store.ensure_user("subj_onboard").await.unwrap();

        let err = complete_onboarding(store.as_ref(), &cache, &user, profile("Healthcare"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DataCorrupt(_)));
        let reloaded = store.find_user_by_subject("subj_onboard").await.unwrap().unwrap();
        assert!(reloaded.industry.is_none());
    }

    #[test]
    fn test_blank_industry_rejected() {
        assert!(matches!(
            validate_profile(profile("   ")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_experience_rejected() {
        let mut p = profile("Finance");
        p.experience = Some(-1);
        assert!(matches!(validate_profile(p), Err(AppError::Validation(_))));
    }
}
