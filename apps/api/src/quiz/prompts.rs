// Quiz generation prompt templates.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::quiz::workflow::{OPTIONS_PER_QUESTION, QUESTION_COUNT};

pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate {count} technical interview questions for a {industry} professional{skills}.

Each question must be multiple choice with exactly {options} options.

OUTPUT SCHEMA (return exactly this structure):
{
  "questions": [
    {
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correct_answer": "string",
      "explanation": "string"
    }
  ]
}

RULES:
1. Return exactly {count} questions.
2. correct_answer must be copied verbatim from one of that question's options.
3. Options within a question must all be different.
4. explanation says briefly why the correct answer is right."#;

pub fn build_quiz_prompt(industry: &str, skills: &[String]) -> String {
    let skills = if skills.is_empty() {
        String::new()
    } else {
        format!(" with expertise in {}", skills.join(", "))
    };
    let body = QUIZ_PROMPT_TEMPLATE
        .replace("{count}", &QUESTION_COUNT.to_string())
        .replace("{options}", &OPTIONS_PER_QUESTION.to_string())
        .replace("{industry}", industry)
        .replace("{skills}", &skills);
    format!("{body}\n\n{JSON_ONLY_INSTRUCTION}")
}
