//! Language-model analysis of a commit.

pub mod ai;
pub mod client;
pub mod error;
pub mod openai;
pub mod prompts;
#[cfg(test)]
pub(crate) mod test_utils;

pub use ai::{AiClient, AiClientMetadata};
pub use client::CommitAnalyzer;
pub use error::AnalysisError;
pub use openai::OpenAiClient;
