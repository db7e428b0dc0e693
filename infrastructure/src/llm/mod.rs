//! Chat-completions capability adapters
//!
//! [`LlmSelector`] and [`LlmReactor`] implement the application ports on
//! top of a shared OpenAI-compatible [`ChatClient`]. Replies are treated
//! as untrusted JSON: extraction happens here, interpretation happens in
//! the domain sanitizers.

mod client;
mod json_extract;
mod prompts;
mod reactor;
mod selector;

pub use client::{ChatClient, ChatClientError};
pub use json_extract::extract_json;
pub use reactor::LlmReactor;
pub use selector::LlmSelector;
