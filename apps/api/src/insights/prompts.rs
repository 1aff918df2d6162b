// Industry insight prompt templates.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"Analyze the current state of the {industry} industry and provide insights in exactly this JSON format:

{
  "salary_ranges": [
    {"role": "string", "min": number, "max": number, "median": number, "location": "string"}
  ],
  "growth_rate": number,
  "demand_level": "High" | "Medium" | "Low",
  "top_skills": ["string"],
  "market_outlook": "Positive" | "Neutral" | "Negative",
  "key_trends": ["string"],
  "recommended_skills": ["string"]
}

RULES:
1. Include at least 5 common roles in salary_ranges, with annual amounts in USD.
2. For every role, min <= median <= max.
3. growth_rate is the expected year-over-year growth as a percentage.
4. Include at least 5 top_skills, 5 key_trends and 5 recommended_skills."#;

pub fn build_insight_prompt(industry: &str) -> String {
    format!(
        "{}\n\n{}",
        INSIGHT_PROMPT_TEMPLATE.replace("{industry}", industry),
        JSON_ONLY_INSTRUCTION
    )
}
