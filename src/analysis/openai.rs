//! OpenAI-compatible chat-completions client.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AiClient, AiClientMetadata, AnalysisError};
use crate::config::Config;

/// Chat message in the request body.
#[derive(Serialize, Debug)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Request body for `POST /chat/completions`.
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

/// Response choice.
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
    #[allow(dead_code)]
    finish_reason: Option<String>,
    #[allow(dead_code)]
    index: Option<u32>,
}

/// Message inside a response choice.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[allow(dead_code)]
    role: String,
    content: String,
}

/// Response body of `POST /chat/completions`.
#[derive(Deserialize, Debug)]
struct ChatResponse {
    id: Option<String>,
    choices: Vec<Choice>,
}

/// Client for any endpoint speaking the OpenAI chat-completions protocol.
pub struct OpenAiClient {
    /// HTTP client. No timeout is configured.
    client: Client,
    /// Static bearer token.
    api_key: String,
    /// Model identifier.
    model: String,
    /// Base URL, e.g. "https://api.openai.com/v1".
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client for `base_url`.
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    /// Creates a client from the report configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
        )
    }

    /// Builds the full chat-completions URL.
    fn get_api_url(&self) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        let url = format!("{base}/chat/completions");

        debug!(base_url = %self.base_url, full_url = %url, "Constructed chat-completions URL");
        url
    }

    /// Posts the two-message chat request and returns the first choice's content.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        debug!(
            system_prompt_len = system_prompt.len(),
            user_prompt_len = user_prompt.len(),
            model = %self.model,
            "Built chat-completions request payload"
        );

        let api_url = self.get_api_url();
        info!(url = %api_url, model = %self.model, "Sending request to chat-completions API");

        let response = self
            .client
            .post(&api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %error_text, "Chat-completions request rejected");
            return Err(AnalysisError::HttpStatus {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::NetworkError(e.to_string()))?;

        let chat_response: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| AnalysisError::InvalidResponseFormat(e.to_string()))?;

        debug!(
            id = ?chat_response.id,
            choice_count = chat_response.choices.len(),
            "Received chat-completions response"
        );

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(AnalysisError::EmptyChoices)?;

        debug!(response_len = content.len(), "Extracted first choice content");
        Ok(content)
    }
}

impl AiClient for OpenAiClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(self.complete(system_prompt, user_prompt))
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "OpenAI-compatible".to_string(),
            model: self.model.clone(),
            endpoint: self.get_api_url(),
        }
    }
}
