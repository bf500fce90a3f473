pub mod gemini;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

use self::gemini::GeminiChatClient;
use super::LlmConfig;
use crate::models::chat::TranscriptEntry;

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// Why a single relay attempt produced no reply.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider call timed out")]
    Timeout,
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("could not decode provider response: {0}")]
    Decode(String),
    #[error("provider returned no text ({reason})")]
    EmptyReply { reason: String },
}

impl RelayError {
    /// Stable short identifier for logs.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Transport(_) => "transport_error",
            RelayError::Timeout => "timeout",
            RelayError::Provider { .. } => "provider_error",
            RelayError::Decode(_) => "decode_error",
            RelayError::EmptyReply { .. } => "empty_reply",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs stay out of the message; logs must not carry endpoint details.
        if err.is_timeout() {
            RelayError::Timeout
        } else if err.is_decode() {
            RelayError::Decode(err.without_url().to_string())
        } else {
            RelayError::Transport(err.without_url().to_string())
        }
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends `message` as the next user turn after `history` and returns the model's text.
    async fn send_message(
        &self,
        history: &[TranscriptEntry],
        message: &str
    ) -> Result<CompletionResponse, RelayError>;

    fn get_model(&self) -> String;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client = GeminiChatClient::from_config(config)?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_kind() {
        let errors = [
            RelayError::Transport("refused".into()),
            RelayError::Timeout,
            RelayError::Provider { status: 500, message: "boom".into() },
            RelayError::Decode("eof".into()),
            RelayError::EmptyReply { reason: "SAFETY".into() },
        ];
        let mut codes: Vec<&str> = errors.iter().map(RelayError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn provider_error_display_carries_status() {
        let err = RelayError::Provider { status: 429, message: "quota".into() };
        assert_eq!(err.to_string(), "provider returned 429: quota");
    }

    #[test]
    fn new_client_rejects_blank_key() {
        let config = LlmConfig {
            api_key: "  ".into(),
            completion_model: "gemini-2.0-flash".into(),
            base_url: "http://localhost:9999/v1beta".into(),
            timeout: None,
        };
        assert!(new_client(&config).is_err());
    }
}
