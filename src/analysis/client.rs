//! Commit analysis on top of an [`AiClient`].

use anyhow::Result;
use tracing::debug;

use super::{prompts, AiClient, AiClientMetadata, OpenAiClient};
use crate::config::Config;

/// Turns a commit message and diff into a daily-report paragraph.
pub struct CommitAnalyzer {
    ai_client: Box<dyn AiClient>,
}

impl CommitAnalyzer {
    /// Creates an analyzer backed by `ai_client`.
    pub fn new(ai_client: Box<dyn AiClient>) -> Self {
        Self { ai_client }
    }

    /// Creates an analyzer talking to the endpoint named in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Box::new(OpenAiClient::from_config(config)))
    }

    /// Returns metadata about the underlying AI client.
    pub fn get_ai_client_metadata(&self) -> AiClientMetadata {
        self.ai_client.get_metadata()
    }

    /// Asks the model for a report of the change.
    ///
    /// The commit message and diff are embedded verbatim, and the reply is
    /// returned without trimming.
    pub async fn analyze(&self, commit_message: &str, diff: &str) -> Result<String> {
        let user_prompt = prompts::generate_user_prompt(commit_message, diff);

        debug!(
            model = %self.ai_client.get_metadata().model,
            diff_len = diff.len(),
            "Requesting commit analysis"
        );

        self.ai_client
            .send_request(prompts::SYSTEM_PROMPT, &user_prompt)
            .await
    }
}
