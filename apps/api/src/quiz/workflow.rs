use std::collections::HashSet;

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{parse_structured, TextGenerator};
use crate::models::assessment::{Assessment, NewAssessment, QuizQuestion};
use crate::models::user::User;
use crate::quiz::prompts::build_quiz_prompt;
use crate::quiz::scoring::{grade, percent_correct, scores_agree};
use crate::store::Store;

pub const QUESTION_COUNT: usize = 10;
pub const OPTIONS_PER_QUESTION: usize = 4;
pub const QUIZ_CATEGORY: &str = "Technical";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuizEnvelope {
    questions: Vec<QuizQuestion>,
}

/// Requests one question set from the generator and validates its shape.
pub async fn generate_quiz(
    llm: &dyn TextGenerator,
    user: &User,
) -> Result<Vec<QuizQuestion>, AppError> {
    let industry = user.industry.as_deref().ok_or(AppError::OnboardingRequired)?;
    let text = llm.generate(&build_quiz_prompt(industry, &user.skills)).await?;
    let questions = parse_quiz(&text)?;
    info!("Generated {} quiz questions for user {}", questions.len(), user.id);
    Ok(questions)
}

pub fn parse_quiz(text: &str) -> Result<Vec<QuizQuestion>, AppError> {
    let envelope: QuizEnvelope = parse_structured(text)
        .map_err(|e| AppError::DataCorrupt(format!("quiz response is not valid JSON: {e}")))?;
    validate_questions(&envelope.questions).map_err(AppError::DataCorrupt)?;
    Ok(envelope.questions)
}

/// Exactly `QUESTION_COUNT` questions, each well-formed.
fn validate_questions(questions: &[QuizQuestion]) -> Result<(), String> {
    if questions.len() != QUESTION_COUNT {
        return Err(format!(
            "expected {QUESTION_COUNT} questions, got {}",
            questions.len()
        ));
    }
    validate_shapes(questions)
}

/// Each question has `OPTIONS_PER_QUESTION` distinct options of which
/// exactly one is the correct answer.
fn validate_shapes(questions: &[QuizQuestion]) -> Result<(), String> {
    for (i, q) in questions.iter().enumerate() {
        let n = i + 1;
        if q.question.trim().is_empty() || q.explanation.trim().is_empty() {
            return Err(format!("question {n} has blank text or explanation"));
        }
        if q.options.len() != OPTIONS_PER_QUESTION {
            return Err(format!(
                "question {n} has {} options, expected {OPTIONS_PER_QUESTION}",
                q.options.len()
            ));
        }
        let distinct: HashSet<&str> = q.options.iter().map(|o| o.trim()).collect();
        if distinct.len() != q.options.len() || distinct.contains("") {
            return Err(format!("question {n} has blank or duplicate options"));
        }
        if !q.options.iter().any(|o| *o == q.correct_answer) {
            return Err(format!("question {n} correct_answer is not one of its options"));
        }
    }
    Ok(())
}

/// Grades the answers server-side and appends the attempt. Submitted
/// questions must have the same shape as generated ones. A claimed score
/// that disagrees with the computed one is logged and replaced.
pub async fn save_result(
    store: &dyn Store,
    user: &User,
    questions: &[QuizQuestion],
    answers: &[Option<String>],
    claimed_score: f64,
) -> Result<Assessment, AppError> {
    if questions.is_empty() {
        return Err(AppError::Validation("questions cannot be empty".to_string()));
    }
    if answers.len() != questions.len() {
        return Err(AppError::Validation(format!(
            "expected {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }
    validate_shapes(questions).map_err(AppError::Validation)?;

    let results = grade(questions, answers);
    let quiz_score = percent_correct(&results);
    if !scores_agree(claimed_score, quiz_score) {
        warn!(
            "Submitted quiz score {claimed_score} for user {} disagrees with computed {quiz_score}; storing computed",
            user.id
        );
    }

    let assessment = store
        .append_assessment(
            user.id,
            &NewAssessment {
                quiz_score,
                questions: results,
                category: QUIZ_CATEGORY.to_string(),
            },
        )
        .await?;

    info!(
        "Saved assessment {} (score {quiz_score:.1}) for user {}",
        assessment.id, user.id
    );
    Ok(assessment)
}

/// The user's attempts, oldest first.
pub async fn list_assessments(store: &dyn Store, user: &User) -> Result<Vec<Assessment>, AppError> {
    Ok(store.list_assessments(user.id).await?)
}
