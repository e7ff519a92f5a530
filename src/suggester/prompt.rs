use crate::model::{CollegeRecord, FilterCriteria};
use tracing::warn;

const PREAMBLE: &str = "You are EduGuide, a friendly assistant that helps students in India choose a college. \
Base every recommendation on the college data below and say so when the data does not cover a question. \
Keep answers short and practical.";

/// Reply-language instruction; codes outside hi/ml get English.
pub fn language_instruction(language: &str) -> &'static str {
    let language = language.to_lowercase();
    if language.starts_with("hi") {
        "Answer in simple Hindi using Devanagari script."
    } else if language.starts_with("ml") {
        "Answer in simple Malayalam using Malayalam script."
    } else {
        "Answer in clear, simple English."
    }
}

/// Prompt used when the filters matched nothing and the assistant should
/// propose alternatives.
pub fn suggestion_prompt(
    colleges: &[CollegeRecord],
    criteria: &FilterCriteria,
    message: &str,
    language: &str,
) -> String {
    let mut prompt = header(colleges, language);
    prompt.push_str("\n\nNo college in the data matched these filters:\n");
    prompt.push_str(&describe_filters(criteria));
    if !message.trim().is_empty() {
        prompt.push_str(&format!("\nStudent's message: {}", message.trim()));
    }
    prompt.push_str("\n\nSuggest the closest alternatives from the data and explain briefly why.");
    prompt
}

/// Prompt for a general conversational question.
pub fn conversation_prompt(colleges: &[CollegeRecord], message: &str, language: &str) -> String {
    let mut prompt = header(colleges, language);
    prompt.push_str(&format!("\n\nStudent's question: {}", message.trim()));
    prompt
}

fn header(colleges: &[CollegeRecord], language: &str) -> String {
    format!(
        "{}\n{}\n\nCollege data (JSON):\n{}",
        PREAMBLE,
        language_instruction(language),
        serialize_colleges(colleges)
    )
}

fn serialize_colleges(colleges: &[CollegeRecord]) -> String {
    serde_json::to_string(colleges).unwrap_or_else(|e| {
        warn!("Failed to serialize colleges for prompt: {}", e);
        "[]".to_string()
    })
}

pub fn describe_filters(criteria: &FilterCriteria) -> String {
    let any = "any";
    format!(
        "- location: {}\n- course: {}\n- max budget (INR/year): {}",
        criteria.location.as_deref().unwrap_or(any),
        criteria.course.as_deref().unwrap_or(any),
        criteria
            .budget
            .map(|b| b.to_string())
            .unwrap_or_else(|| any.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colleges() -> Vec<CollegeRecord> {
        vec![CollegeRecord {
            name: "Model Engineering College".into(),
            city: "Kochi".into(),
            state: "Kerala".into(),
            ..Default::default()
        }]
    }

    #[test]
    fn language_selects_instruction() {
        assert!(language_instruction("hi").contains("Hindi"));
        assert!(language_instruction("ml").contains("Malayalam"));
        assert!(language_instruction("ta").contains("English"));
        assert!(language_instruction("en").contains("English"));
    }

    #[test]
    fn suggestion_prompt_carries_data_and_filters() {
        let criteria = FilterCriteria {
            location: Some("Goa".into()),
            budget: Some(50000),
            ..Default::default()
        };
        let prompt = suggestion_prompt(&colleges(), &criteria, "cheap colleges in Goa", "ml");
        assert!(prompt.starts_with(PREAMBLE));
        assert!(prompt.contains("Malayalam"));
        assert!(prompt.contains("\"name\":\"Model Engineering College\""));
        assert!(prompt.contains("- location: Goa"));
        assert!(prompt.contains("- course: any"));
        assert!(prompt.contains("- max budget (INR/year): 50000"));
        assert!(prompt.contains("Student's message: cheap colleges in Goa"));
    }

    #[test]
    fn conversation_prompt_ends_with_question() {
        let prompt = conversation_prompt(&colleges(), "  what is NIRF?  ", "en");
        assert!(prompt.ends_with("Student's question: what is NIRF?"));
        assert!(prompt.contains("Kochi"));
    }
}
