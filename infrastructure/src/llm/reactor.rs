//! Chat-completions reactor adapter

use super::client::{ChatClient, ChatClientError};
use super::json_extract::extract_json;
use super::prompts::{reactor_system_prompt, reactor_user_prompt};
use async_trait::async_trait;
use classroom_application::ports::reactor::{ReactionRequest, Reactor, ReactorError};
use tracing::debug;

/// Reactor capability backed by a chat-completions endpoint.
///
/// One instance serves the whole roster; the persona and state arrive
/// with each request, so concurrent per-student invocations share the
/// underlying HTTP client.
pub struct LlmReactor {
    client: ChatClient,
}

impl LlmReactor {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

fn map_error(e: ChatClientError) -> ReactorError {
    match e {
        ChatClientError::Timeout => ReactorError::Timeout,
        ChatClientError::Connection(msg) => ReactorError::ConnectionError(msg),
        ChatClientError::MissingApiKey(var) => {
            ReactorError::ConnectionError(format!("API key variable {} not set", var))
        }
        ChatClientError::Http { status, body } => {
            ReactorError::RequestFailed(format!("HTTP {}: {}", status, body))
        }
        ChatClientError::Malformed(msg) => ReactorError::MalformedResponse(msg),
    }
}

#[async_trait]
impl Reactor for LlmReactor {
    async fn react(&self, request: &ReactionRequest) -> Result<serde_json::Value, ReactorError> {
        let system = reactor_system_prompt(request);
        let user = reactor_user_prompt(request);
        debug!("Reactor request for {}", request.student_id);

        let reply = self
            .client
            .complete(&system, &user)
            .await
            .map_err(map_error)?;

        extract_json(&reply).ok_or_else(|| {
            ReactorError::MalformedResponse(format!(
                "no JSON object in reply for {}",
                request.student_id
            ))
        })
    }
}
