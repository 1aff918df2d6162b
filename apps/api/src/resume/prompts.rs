// Resume improvement prompt templates.

pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"As an expert resume writer, improve the following {section} description{audience}.
Make it more impactful, quantifiable, and aligned with industry standards.

CURRENT CONTENT:
"{current}"

RULES:
1. Use strong action verbs.
2. Include metrics and results where the content supports them. Do NOT invent numbers.
3. Highlight relevant technical skills.
4. Keep it concise but detailed.
5. Focus on achievements over responsibilities.
6. Return the improved text as a single paragraph with no additional text, labels, or explanations."#;

/// Builds the improvement prompt. Deterministic for identical inputs.
pub fn build_improve_prompt(current: &str, section: &str, industry: Option<&str>) -> String {
    let audience = industry
        .map(|i| format!(" for a {i} professional"))
        .unwrap_or_default();
    IMPROVE_PROMPT_TEMPLATE
        .replace("{section}", section)
        .replace("{audience}", &audience)
        .replace("{current}", current)
}
