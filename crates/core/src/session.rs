//! Assistant Session Client
//!
//! An `AssistantSession` owns the one assistant and the one thread used for
//! the lifetime of the process. Both are resolved in `open`, either reused
//! from configuration or freshly created, and every request afterwards is
//! the same sequence: append a user message, start a run, poll it until it
//! stops, and on success collect the assistant's replies.

use crate::{
    backend::{AssistantBackend, AssistantId, MessageRole, RunStatus, ThreadId},
    prompts,
    reply::{self, AssistantReply, ReplyKind},
};
use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, instrument, warn};

/// Which replies a completed request hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// Every assistant reply in the thread, most recent first, on every call.
    #[default]
    Transcript,
    /// Only replies newer than the newest one already returned.
    Latest,
}

/// Startup parameters for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub assistant_id: Option<AssistantId>,
    pub thread_id: Option<ThreadId>,
    /// Model used only when a new assistant has to be created.
    pub model: String,
    pub poll_interval: Duration,
    pub history_mode: HistoryMode,
}

/// How an id was obtained at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Reused,
    Created,
}

/// Result of one request.
#[derive(Debug)]
pub enum RequestOutcome {
    /// The run completed; replies are most recent first.
    Completed(Vec<AssistantReply>),
    /// The run stopped in some other terminal state.
    NotCompleted(RunStatus),
}

pub struct AssistantSession {
    backend: Arc<dyn AssistantBackend>,
    assistant_id: AssistantId,
    thread_id: ThreadId,
    assistant_resolution: Resolution,
    thread_resolution: Resolution,
    poll_interval: Duration,
    history_mode: HistoryMode,
    last_seen: Option<String>,
}

impl AssistantSession {
    /// Resolves the assistant and thread, creating whichever is not configured.
    pub async fn open(backend: Arc<dyn AssistantBackend>, config: SessionConfig) -> Result<Self> {
        let (assistant_id, assistant_resolution) = match config.assistant_id {
            Some(id) => {
                info!(assistant_id = %id, "Reusing configured assistant");
                (id, Resolution::Reused)
            }
            None => {
                let spec = prompts::default_assistant_spec(&config.model);
                let id = backend.create_assistant(&spec).await?;
                info!(assistant_id = %id, model = %config.model, "Created assistant");
                (id, Resolution::Created)
            }
        };

        let (thread_id, thread_resolution) = match config.thread_id {
            Some(id) => {
                info!(thread_id = %id, "Reusing configured thread");
                (id, Resolution::Reused)
            }
            None => {
                let id = backend.create_thread().await?;
                info!(thread_id = %id, "Created thread");
                (id, Resolution::Created)
            }
        };

        Ok(Self {
            backend,
            assistant_id,
            thread_id,
            assistant_resolution,
            thread_resolution,
            poll_interval: config.poll_interval,
            history_mode: config.history_mode,
            last_seen: None,
        })
    }

    pub fn assistant_id(&self) -> &AssistantId {
        &self.assistant_id
    }

    pub fn thread_id(&self) -> &ThreadId {
        &self.thread_id
    }

    pub fn assistant_resolution(&self) -> Resolution {
        self.assistant_resolution
    }

    pub fn thread_resolution(&self) -> Resolution {
        self.thread_resolution
    }

    /// Asks for the next topic to study given a summary of today's study.
    pub async fn request_learning_suggestion(&mut self, summary: &str) -> Result<RequestOutcome> {
        self.request(
            summary,
            prompts::SUGGESTION_RUN_INSTRUCTIONS,
            ReplyKind::StudySuggestion,
        )
        .await
    }

    /// Asks for vocabulary related to `word`.
    pub async fn request_related_vocabulary(&mut self, word: &str) -> Result<RequestOutcome> {
        let prompt = prompts::vocabulary_prompt(word);
        self.request(
            &prompt,
            prompts::VOCABULARY_RUN_INSTRUCTIONS,
            ReplyKind::RelatedVocabulary,
        )
        .await
    }

    #[instrument(skip_all, fields(thread_id = %self.thread_id, kind = ?kind))]
    async fn request(
        &mut self,
        content: &str,
        instructions: &str,
        kind: ReplyKind,
    ) -> Result<RequestOutcome> {
        let message = self
            .backend
            .append_message(&self.thread_id, MessageRole::User, content)
            .await?;
        debug!(message_id = %message.id, "User message appended");

        let status = self.run_and_wait(instructions).await?;
        if status != RunStatus::Completed {
            warn!(%status, "Run did not complete");
            return Ok(RequestOutcome::NotCompleted(status));
        }

        let messages = self.backend.list_messages(&self.thread_id).await?;
        let newest = messages.first().map(|m| m.id.clone());

        // Only replies newer than `last_seen` belong to this request's run.
        let mut fresh = true;
        let mut replies = Vec::new();
        for message in &messages {
            if self.last_seen.as_deref() == Some(message.id.as_str()) {
                if self.history_mode == HistoryMode::Latest {
                    break;
                }
                fresh = false;
            }
            if message.role != MessageRole::Assistant {
                continue;
            }
            let parsed = reply::parse_message(message);
            if fresh {
                if let Ok(value) = &parsed {
                    if !kind.conforms(value) {
                        warn!(message_id = %message.id, ?kind, "Reply does not have the requested shape");
                    }
                }
            }
            replies.push(AssistantReply {
                message_id: message.id.clone(),
                parsed,
            });
        }

        if newest.is_some() {
            self.last_seen = newest;
        }
        info!(replies = replies.len(), "Run completed");
        Ok(RequestOutcome::Completed(replies))
    }

    /// Starts a run and polls it until it reaches a terminal status.
    ///
    /// There is no timeout: an unresponsive service blocks here indefinitely.
    async fn run_and_wait(&self, instructions: &str) -> Result<RunStatus> {
        let mut run = self
            .backend
            .create_run(&self.thread_id, &self.assistant_id, instructions)
            .await?;
        info!(run_id = %run.id, "Run started");

        while !run.status.is_terminal() {
            debug!(run_id = %run.id, status = %run.status, "Waiting for run");
            tokio::time::sleep(self.poll_interval).await;
            run = self.backend.retrieve_run(&self.thread_id, &run.id).await?;
        }
        Ok(run.status)
    }
}
