//! Analysis-specific error handling.

use thiserror::Error;

/// Errors from the chat-completions endpoint.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The endpoint answered with a status other than 200.
    #[error("HTTP Status: {status}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The response body does not match the chat-completions schema.
    #[error("Invalid response format: {0}")]
    InvalidResponseFormat(String),

    /// The response parsed but carried no choices.
    #[error("No choices in response")]
    EmptyChoices,
}
