//! Fixed prompt text sent to the assistant.

use crate::backend::{AssistantSpec, AssistantTool, ResponseFormatHint};

pub const ASSISTANT_NAME: &str = "Language Learning Assistant";

pub const ASSISTANT_INSTRUCTIONS: &str = "You are an assistant designed to help users learn new languages. \
When a user provides a summary of what they learned today, you will suggest the next topic for them to study. \
You also provide definitions and context for vocabulary words they want to learn more about.";

pub const SUGGESTION_RUN_INSTRUCTIONS: &str = r#"Please output the information in structured JSON format without using markdown code blocks.
Make the response like this:
{"next_study_topic": "Your suggestion for the next topic to study", "explanation": "Explanation of the current topic"}"#;

pub const VOCABULARY_RUN_INSTRUCTIONS: &str = r#"Please output the information in structured JSON format without using markdown code blocks.
Make the response like this:
{"related_words": ["word1", "word2", "word3"], "explanation": "Explanation of the provided word"}"#;

/// Builds the user message asking for words related to `word`.
pub fn vocabulary_prompt(word: &str) -> String {
    format!("단어 '{word}'에 대해 추가 학습할 단어를 추천해 주세요.")
}

/// The assistant created when none is configured.
pub fn default_assistant_spec(model: &str) -> AssistantSpec {
    AssistantSpec {
        name: ASSISTANT_NAME.to_string(),
        instructions: ASSISTANT_INSTRUCTIONS.to_string(),
        model: model.to_string(),
        tools: vec![AssistantTool::Retrieval],
        response_format: ResponseFormatHint::JsonObject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_prompt_embeds_word() {
        assert_eq!(
            vocabulary_prompt("run"),
            "단어 'run'에 대해 추가 학습할 단어를 추천해 주세요."
        );
    }

    #[test]
    fn test_run_instructions_name_requested_keys() {
        assert!(SUGGESTION_RUN_INSTRUCTIONS.contains("\"next_study_topic\""));
        assert!(SUGGESTION_RUN_INSTRUCTIONS.contains("\"explanation\""));
        assert!(VOCABULARY_RUN_INSTRUCTIONS.contains("\"related_words\""));
        assert!(VOCABULARY_RUN_INSTRUCTIONS.contains("without using markdown"));
    }
}
