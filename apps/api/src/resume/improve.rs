use tracing::info;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::resume::Resume;
use crate::models::user::User;
use crate::resume::prompts::build_improve_prompt;
use crate::store::Store;

/// Rewrites one resume fragment through the generator and returns the
/// trimmed result. Has no persistence side effect.
pub async fn improve(
    llm: &dyn TextGenerator,
    user: &User,
    current: &str,
    section: &str,
) -> Result<String, AppError> {
    if current.trim().is_empty() {
        return Err(AppError::Validation("current text cannot be empty".to_string()));
    }
    if section.trim().is_empty() {
        return Err(AppError::Validation("section cannot be empty".to_string()));
    }

    let prompt = build_improve_prompt(current, section, user.industry.as_deref());
    let improved = llm.generate(&prompt).await?;
    let improved = improved.trim();

    if improved.is_empty() {
        return Err(AppError::GenerationFailed(
            "improvement came back empty".to_string(),
        ));
    }

    info!("Improved '{section}' text for user {}", user.id);
    Ok(improved.to_string())
}

/// Overwrites the user's resume with `content`, verbatim.
pub async fn save(store: &dyn Store, user: &User, content: &str) -> Result<Resume, AppError> {
    let resume = store.upsert_resume(user.id, content).await?;
    info!("Saved resume for user {} ({} bytes)", user.id, content.len());
    Ok(resume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::scripted::{Scripted, ScriptedGenerator};
    use crate::store::memory::MemoryStore;

    async fn user(store: &MemoryStore) -> User {
        store.ensure_user("subj_resume").await.unwrap()
    }

    #[tokio::test]
    async fn test_improve_trims_and_leaves_resume_untouched() {
        let store = MemoryStore::new();
        let user = user(&store).await;
        save(&store, &user, "# Original").await.unwrap();
        let llm = ScriptedGenerator::with_text("\n  Led a team of 5 engineers to ship X.  \n");

        let improved = improve(&llm, &user, "Led team of 5", "work-experience")
            .await
            .unwrap();

        assert_eq!(improved, "Led a team of 5 engineers to ship X.");
        assert_eq!(llm.calls(), 1);
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Led team of 5"));
        assert!(prompt.contains("work-experience"));
        let stored = store.get_resume(user.id).await.unwrap().unwrap();
        assert_eq!(stored.content, "# Original");
    }

    #[tokio::test]
    async fn test_improve_rejects_blank_input_without_calling_generator() {
        let store = MemoryStore::new();
        let user = user(&store).await;
        let llm = ScriptedGenerator::new();

        let err = improve(&llm, &user, "   ", "summary").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_improve_whitespace_only_result_is_generation_failure() {
        let store = MemoryStore::new();
        let user = user(&store).await;
        let llm = ScriptedGenerator::with_text("   \n ");

        let err = improve(&llm, &user, "Built things", "project").await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_improve_upstream_error_propagates() {
        let store = MemoryStore::new();
        let user = user(&store).await;
        let llm = ScriptedGenerator::new();
        llm.push(Scripted::Fail("overloaded".to_string()));

        let err = improve(&llm, &user, "Built things", "project").await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_save_then_read_returns_exact_content() {
        let store = MemoryStore::new();
        let user = user(&store).await;

        save(&store, &user, "# First\n\n- a").await.unwrap();
        let second = save(&store, &user, "# Second").await.unwrap();

        let stored = store.get_resume(user.id).await.unwrap().unwrap();
        assert_eq!(stored.content, "# Second");
        assert_eq!(stored.id, second.id);
    }

    #[tokio::test]
    async fn test_save_accepts_empty_content() {
        let store = MemoryStore::new();
        let user = user(&store).await;
        let resume = save(&store, &user, "").await.unwrap();
        assert_eq!(resume.content, "");
    }
}
