//! AI client trait and metadata definitions.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;

/// Metadata about an AI client implementation.
#[derive(Clone, Debug)]
pub struct AiClientMetadata {
    /// Service provider name.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Endpoint the requests are sent to.
    pub endpoint: String,
}

/// Trait for chat-completion clients.
pub trait AiClient: Send + Sync {
    /// Sends a system and user prompt and returns the first reply unmodified.
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

    /// Returns metadata about the AI client implementation.
    fn get_metadata(&self) -> AiClientMetadata;
}
