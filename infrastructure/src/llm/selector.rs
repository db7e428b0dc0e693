//! Chat-completions selector adapter

use super::client::{ChatClient, ChatClientError};
use super::json_extract::extract_json;
use super::prompts::{SELECTOR_SYSTEM_PROMPT, selector_user_prompt};
use async_trait::async_trait;
use classroom_application::ports::selector::{Selector, SelectorError};
use classroom_domain::ClassroomSession;
use tracing::debug;

/// Selector capability backed by a chat-completions endpoint
pub struct LlmSelector {
    client: ChatClient,
}

impl LlmSelector {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

fn map_error(e: ChatClientError) -> SelectorError {
    match e {
        ChatClientError::Timeout => SelectorError::Timeout,
        ChatClientError::Connection(msg) => SelectorError::ConnectionError(msg),
        ChatClientError::MissingApiKey(var) => {
            SelectorError::ConnectionError(format!("API key variable {} not set", var))
        }
        ChatClientError::Http { status, body } => {
            SelectorError::RequestFailed(format!("HTTP {}: {}", status, body))
        }
        ChatClientError::Malformed(msg) => SelectorError::MalformedResponse(msg),
    }
}

#[async_trait]
impl Selector for LlmSelector {
    async fn select(
        &self,
        utterance: &str,
        session: &ClassroomSession,
    ) -> Result<serde_json::Value, SelectorError> {
        let user_prompt = selector_user_prompt(utterance, session);
        debug!(
            "Selector request for round {} ({} students)",
            session.round_num + 1,
            session.roster_size()
        );

        let reply = self
            .client
            .complete(SELECTOR_SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(map_error)?;

        extract_json(&reply).ok_or_else(|| {
            SelectorError::MalformedResponse(format!(
                "no JSON object in selector reply ({} chars)",
                reply.len()
            ))
        })
    }
}
