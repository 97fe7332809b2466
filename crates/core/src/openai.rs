//! `AssistantBackend` implementation for the OpenAI Assistants API (v2).

use crate::backend::{
    AssistantBackend, AssistantId, AssistantSpec, AssistantTool, ContentBlock, MessageRole,
    ResponseFormatHint, RunRecord, RunStatus, ThreadId, ThreadMessage,
};
use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        self as oai, AssistantTools, AssistantToolsFileSearch, AssistantsApiResponseFormatOption,
        CreateAssistantRequestArgs, CreateMessageRequestArgs, CreateMessageRequestContent,
        CreateRunRequestArgs, CreateThreadRequest, MessageContent, MessageObject, ResponseFormat,
        RunObject,
    },
};
use async_trait::async_trait;
use tracing::debug;

/// Talks to any OpenAI-compatible Assistants endpoint.
pub struct OpenAIAssistantBackend {
    client: Client<OpenAIConfig>,
}

impl OpenAIAssistantBackend {
    /// Creates a backend from a fully prepared client configuration
    /// (API key, base URL).
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::with_config(config),
        }
    }
}

fn to_oai_tool(tool: AssistantTool) -> AssistantTools {
    match tool {
        AssistantTool::Retrieval => AssistantTools::FileSearch(AssistantToolsFileSearch::default()),
    }
}

fn to_oai_response_format(hint: ResponseFormatHint) -> AssistantsApiResponseFormatOption {
    match hint {
        ResponseFormatHint::Text => AssistantsApiResponseFormatOption::Format(ResponseFormat::Text),
        ResponseFormatHint::JsonObject => {
            AssistantsApiResponseFormatOption::Format(ResponseFormat::JsonObject)
        }
    }
}

fn to_oai_role(role: MessageRole) -> oai::MessageRole {
    match role {
        MessageRole::User => oai::MessageRole::User,
        MessageRole::Assistant => oai::MessageRole::Assistant,
    }
}

fn from_oai_role(role: &oai::MessageRole) -> MessageRole {
    match role {
        oai::MessageRole::User => MessageRole::User,
        oai::MessageRole::Assistant => MessageRole::Assistant,
    }
}

fn from_oai_status(status: &oai::RunStatus) -> RunStatus {
    match status {
        oai::RunStatus::Queued => RunStatus::Queued,
        oai::RunStatus::InProgress => RunStatus::InProgress,
        oai::RunStatus::RequiresAction => RunStatus::RequiresAction,
        oai::RunStatus::Cancelling => RunStatus::Cancelling,
        oai::RunStatus::Cancelled => RunStatus::Cancelled,
        oai::RunStatus::Failed => RunStatus::Failed,
        oai::RunStatus::Completed => RunStatus::Completed,
        oai::RunStatus::Incomplete => RunStatus::Incomplete,
        oai::RunStatus::Expired => RunStatus::Expired,
    }
}

fn from_oai_message(message: MessageObject) -> ThreadMessage {
    let content = message
        .content
        .into_iter()
        .map(|block| match block {
            MessageContent::Text(text) => ContentBlock::Text(text.text.value),
            _ => ContentBlock::Other,
        })
        .collect();
    ThreadMessage {
        id: message.id,
        role: from_oai_role(&message.role),
        content,
    }
}

fn from_oai_run(run: RunObject) -> RunRecord {
    RunRecord {
        status: from_oai_status(&run.status),
        id: run.id,
    }
}

#[async_trait]
impl AssistantBackend for OpenAIAssistantBackend {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantId> {
        let request = CreateAssistantRequestArgs::default()
            .name(spec.name.as_str())
            .instructions(spec.instructions.as_str())
            .model(spec.model.as_str())
            .tools(spec.tools.iter().copied().map(to_oai_tool).collect::<Vec<_>>())
            .response_format(to_oai_response_format(spec.response_format))
            .build()?;

        let assistant = self
            .client
            .assistants()
            .create(request)
            .await
            .context("Failed to create assistant")?;
        Ok(AssistantId::from(assistant.id))
    }

    async fn create_thread(&self) -> Result<ThreadId> {
        let thread = self
            .client
            .threads()
            .create(CreateThreadRequest::default())
            .await
            .context("Failed to create thread")?;
        Ok(ThreadId::from(thread.id))
    }

    async fn append_message(
        &self,
        thread: &ThreadId,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage> {
        let request = CreateMessageRequestArgs::default()
            .role(to_oai_role(role))
            .content(CreateMessageRequestContent::Content(content.to_string()))
            .build()?;

        let message = self
            .client
            .threads()
            .messages(thread.as_str())
            .create(request)
            .await
            .with_context(|| format!("Failed to append message to thread {thread}"))?;
        Ok(from_oai_message(message))
    }

    async fn create_run(
        &self,
        thread: &ThreadId,
        assistant: &AssistantId,
        instructions: &str,
    ) -> Result<RunRecord> {
        let request = CreateRunRequestArgs::default()
            .assistant_id(assistant.as_str())
            .instructions(instructions)
            .build()?;

        let run = self
            .client
            .threads()
            .runs(thread.as_str())
            .create(request)
            .await
            .with_context(|| format!("Failed to start run on thread {thread}"))?;
        debug!(run_id = %run.id, status = ?run.status, "Run created");
        Ok(from_oai_run(run))
    }

    async fn retrieve_run(&self, thread: &ThreadId, run_id: &str) -> Result<RunRecord> {
        let run = self
            .client
            .threads()
            .runs(thread.as_str())
            .retrieve(run_id)
            .await
            .with_context(|| format!("Failed to retrieve run {run_id}"))?;
        Ok(from_oai_run(run))
    }

    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>> {
        let page = self
            .client
            .threads()
            .messages(thread.as_str())
            .list(&[("order", "desc")])
            .await
            .with_context(|| format!("Failed to list messages of thread {thread}"))?;
        Ok(page.data.into_iter().map(from_oai_message).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_preserves_wire_names() {
        let statuses = [
            oai::RunStatus::Queued,
            oai::RunStatus::InProgress,
            oai::RunStatus::Failed,
            oai::RunStatus::Completed,
            oai::RunStatus::Expired,
        ];
        for status in statuses {
            let wire = serde_json::to_value(&status).unwrap();
            let ours = serde_json::to_value(from_oai_status(&status)).unwrap();
            assert_eq!(wire, ours);
        }
    }

    #[test]
    fn test_retrieval_tool_serializes_as_file_search() {
        let tool = serde_json::to_value(to_oai_tool(AssistantTool::Retrieval)).unwrap();
        assert_eq!(tool["type"], "file_search");
    }

    #[test]
    fn test_json_response_format_hint() {
        let format =
            serde_json::to_value(to_oai_response_format(ResponseFormatHint::JsonObject)).unwrap();
        assert_eq!(format["type"], "json_object");
    }
}
