//! Remote Assistant Backend
//!
//! Defines the seam between the session logic and the hosted assistant
//! service. The session only ever talks to an `AssistantBackend`, which keeps
//! the OpenAI wire types out of the rest of the crate and lets tests swap in
//! a scripted fake.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key of a remote assistant configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssistantId(String);

/// Opaque key of a remote conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(AssistantId);
string_id!(ThreadId);

/// Tools an assistant may be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantTool {
    /// Document retrieval over attached files (`file_search` in the v2 API).
    Retrieval,
}

/// Response format hint attached to a newly created assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormatHint {
    Text,
    JsonObject,
}

/// Everything needed to create a remote assistant.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantSpec {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub tools: Vec<AssistantTool>,
    pub response_format: ResponseFormatHint,
}

/// Who authored a thread message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single content block of a thread message.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(String),
    /// Images, refusals and anything else that carries no plain text value.
    Other,
}

/// A message as returned by the list-messages call.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: Vec<ContentBlock>,
}

impl ThreadMessage {
    /// Text of the first content block, if that block is text.
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first() {
            Some(ContentBlock::Text(text)) => Some(text),
            _ => None,
        }
    }
}

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
}

impl RunStatus {
    /// Whether polling should stop at this status.
    ///
    /// `RequiresAction` counts as terminal: this client never submits tool
    /// outputs, so the run would otherwise sit there until it expires.
    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub id: String,
    pub status: RunStatus,
}

/// The remote operations the session needs.
///
/// Implementations map these onto a concrete service; errors are transport
/// or API failures and are never retried by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantId>;

    async fn create_thread(&self) -> Result<ThreadId>;

    async fn append_message(
        &self,
        thread: &ThreadId,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage>;

    async fn create_run(
        &self,
        thread: &ThreadId,
        assistant: &AssistantId,
        instructions: &str,
    ) -> Result<RunRecord>;

    async fn retrieve_run(&self, thread: &ThreadId, run_id: &str) -> Result<RunRecord>;

    /// Lists the thread's messages, most recent first.
    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        for status in [
            RunStatus::Completed,
            RunStatus::Failed,
            RunStatus::Cancelled,
            RunStatus::Expired,
            RunStatus::Incomplete,
            RunStatus::RequiresAction,
        ] {
            assert!(status.is_terminal(), "{status} should be terminal");
        }
        for status in [RunStatus::Queued, RunStatus::InProgress, RunStatus::Cancelling] {
            assert!(!status.is_terminal(), "{status} should not be terminal");
        }
    }

    #[test]
    fn test_run_status_display_matches_wire_name() {
        assert_eq!(RunStatus::Failed.to_string(), "failed");
        assert_eq!(RunStatus::InProgress.to_string(), "in_progress");
        let wire = serde_json::to_string(&RunStatus::RequiresAction).unwrap();
        assert_eq!(wire, "\"requires_action\"");
    }

    #[test]
    fn test_first_text_skips_non_text_block() {
        let message = ThreadMessage {
            id: "msg_1".into(),
            role: MessageRole::Assistant,
            content: vec![ContentBlock::Other, ContentBlock::Text("hi".into())],
        };
        assert_eq!(message.first_text(), None);
    }
}
