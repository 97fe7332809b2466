//! Parsing and rendering of the assistant's JSON replies.
//!
//! The assistant is asked for a bare JSON object, but nothing on the remote
//! side enforces that. Parsing therefore returns a `ReplyError` instead of
//! panicking, and the caller decides what a malformed reply means.

use serde_json::{Value, ser::PrettyFormatter};
use thiserror::Error;

use crate::backend::ThreadMessage;

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Reply {message_id} is not valid JSON: {source}")]
    Malformed {
        message_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Reply {message_id} has no text content")]
    NoText { message_id: String },
}

/// Which JSON object a run was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// `{"next_study_topic": string, "explanation": string}`
    StudySuggestion,
    /// `{"related_words": [string], "explanation": string}`
    RelatedVocabulary,
}

impl ReplyKind {
    /// Whether `value` has the fields this kind asks for, with the right types.
    pub fn conforms(self, value: &Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        let explanation = object.get("explanation").is_some_and(Value::is_string);
        match self {
            ReplyKind::StudySuggestion => {
                explanation && object.get("next_study_topic").is_some_and(Value::is_string)
            }
            ReplyKind::RelatedVocabulary => {
                explanation
                    && object
                        .get("related_words")
                        .and_then(Value::as_array)
                        .is_some_and(|words| words.iter().all(Value::is_string))
            }
        }
    }
}

/// One assistant message from the thread, with its parse result.
#[derive(Debug)]
pub struct AssistantReply {
    pub message_id: String,
    pub parsed: Result<Value, ReplyError>,
}

/// Parses the first content block of `message` as JSON.
pub fn parse_message(message: &ThreadMessage) -> Result<Value, ReplyError> {
    let text = message.first_text().ok_or_else(|| ReplyError::NoText {
        message_id: message.id.clone(),
    })?;
    serde_json::from_str(text).map_err(|source| ReplyError::Malformed {
        message_id: message.id.clone(),
        source,
    })
}

/// Pretty-prints with four-space indentation. Key order is kept as received
/// and non-ASCII text is written as-is.
pub fn to_pretty_json(value: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(value, &mut ser)?;
    Ok(String::from_utf8(buf).expect("serde_json writes UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ContentBlock, MessageRole};
    use serde_json::json;

    fn assistant_message(id: &str, text: &str) -> ThreadMessage {
        ThreadMessage {
            id: id.into(),
            role: MessageRole::Assistant,
            content: vec![ContentBlock::Text(text.into())],
        }
    }

    #[test]
    fn test_pretty_json_keeps_key_order_and_indent() {
        let message = assistant_message(
            "msg_1",
            r#"{"next_study_topic":"Topic A","explanation":"Because X"}"#,
        );
        let value = parse_message(&message).unwrap();
        assert_eq!(
            to_pretty_json(&value).unwrap(),
            "{\n    \"next_study_topic\": \"Topic A\",\n    \"explanation\": \"Because X\"\n}"
        );
    }

    #[test]
    fn test_pretty_json_writes_non_ascii_literally() {
        let value = json!({"next_study_topic": "미래 시제", "explanation": "Ça va"});
        let rendered = to_pretty_json(&value).unwrap();
        assert!(rendered.contains("미래 시제"));
        assert!(rendered.contains("Ça va"));
        assert!(!rendered.contains("\\u"));
    }

    #[test]
    fn test_vocabulary_reply_renders_nested_array() {
        let message = assistant_message(
            "msg_2",
            r#"{"related_words":["jog","sprint","dash"],"explanation":"Common words for moving quickly"}"#,
        );
        let value = parse_message(&message).unwrap();
        assert!(ReplyKind::RelatedVocabulary.conforms(&value));
        assert_eq!(
            to_pretty_json(&value).unwrap(),
            "{\n    \"related_words\": [\n        \"jog\",\n        \"sprint\",\n        \"dash\"\n    ],\n    \"explanation\": \"Common words for moving quickly\"\n}"
        );
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = parse_message(&assistant_message("msg_3", "not json")).unwrap_err();
        match err {
            ReplyError::Malformed { message_id, .. } => assert_eq!(message_id, "msg_3"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_image_only_message_has_no_text() {
        let message = ThreadMessage {
            id: "msg_4".into(),
            role: MessageRole::Assistant,
            content: vec![ContentBlock::Other],
        };
        assert!(matches!(
            parse_message(&message),
            Err(ReplyError::NoText { .. })
        ));
    }

    #[test]
    fn test_conforms_rejects_wrong_shape() {
        let suggestion = json!({"next_study_topic": "Future tense", "explanation": "next"});
        assert!(ReplyKind::StudySuggestion.conforms(&suggestion));
        assert!(!ReplyKind::RelatedVocabulary.conforms(&suggestion));
        assert!(!ReplyKind::RelatedVocabulary.conforms(&json!({
            "related_words": ["jog", 3],
            "explanation": "mixed"
        })));
        assert!(!ReplyKind::StudySuggestion.conforms(&json!(["not", "an", "object"])));
    }
}
