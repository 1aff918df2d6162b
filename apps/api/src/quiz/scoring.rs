//! Quiz scoring. The server derives the score from the submitted answers;
//! a caller-supplied score is only compared against it.

use crate::models::assessment::{QuestionResult, QuizQuestion};

/// Scores below this difference are treated as agreeing with ours.
const SCORE_TOLERANCE: f64 = 0.01;

/// Pairs each question with the caller's answer. `answers` must be the same
/// length as `questions`; the caller checks that.
pub fn grade(questions: &[QuizQuestion], answers: &[Option<String>]) -> Vec<QuestionResult> {
    questions
        .iter()
        .zip(answers)
        .map(|(q, answer)| QuestionResult {
            question: q.question.clone(),
            options: q.options.clone(),
            correct_answer: q.correct_answer.clone(),
            user_answer: answer.clone(),
            is_correct: answer.as_deref() == Some(q.correct_answer.as_str()),
            explanation: q.explanation.clone(),
        })
        .collect()
}

/// Percentage of correct answers, 0–100. An empty set scores 0.
pub fn percent_correct(results: &[QuestionResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let correct = results.iter().filter(|r| r.is_correct).count();
    correct as f64 / results.len() as f64 * 100.0
}

pub fn scores_agree(claimed: f64, computed: f64) -> bool {
    (claimed - computed).abs() < SCORE_TOLERANCE
}
