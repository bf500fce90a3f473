use async_trait::async_trait;
use std::error::Error as StdError;
use serde::{ Deserialize, Serialize };
use log::{ info, debug };
use reqwest::Client as HttpClient;

use super::{ ChatClient, CompletionResponse, RelayError };
use crate::llm::LlmConfig;
use crate::models::chat::TranscriptEntry;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<&'a TranscriptEntry>,
}

/// `history` goes out as prior context with `next_turn` appended as the final entry.
fn build_request<'a>(
    history: &'a [TranscriptEntry],
    next_turn: &'a TranscriptEntry
) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: history.iter().chain(std::iter::once(next_turn)).collect(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
    prompt_feedback: Option<GooglePromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleCandidate {
    content: Option<GoogleContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GoogleContent {
    #[serde(default)]
    parts: Vec<GooglePart>,
}

#[derive(Deserialize)]
struct GooglePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GooglePromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Concatenates the text parts of the first candidate.
fn extract_text(resp: GenerateContentResponse) -> Result<String, RelayError> {
    let block_reason = resp.prompt_feedback.and_then(|f| f.block_reason);
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(RelayError::EmptyReply {
            reason: block_reason.unwrap_or_else(|| "no candidates".to_string()),
        });
    };

    let text: String = candidate.content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(RelayError::EmptyReply {
            reason: candidate.finish_reason.unwrap_or_else(|| "no text parts".to_string()),
        });
    }
    Ok(text)
}

fn provider_error(status: u16, body: &str) -> RelayError {
    let message = serde_json
        ::from_str::<GoogleErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    RelayError::Provider { status, message }
}

pub struct GeminiChatClient {
    http: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiChatClient {
    fn new(config: LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        if config.api_key.trim().is_empty() {
            return Err("Gemini API key is required for GeminiChatClient".into());
        }
        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            model: config.completion_model,
            base_url: config.base_url,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        Self::new(config.clone())
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl ChatClient for GeminiChatClient {
    async fn send_message(
        &self,
        history: &[TranscriptEntry],
        message: &str
    ) -> Result<CompletionResponse, RelayError> {
        let next_turn = TranscriptEntry::user(message);
        let payload = build_request(history, &next_turn);
        info!(
            "GeminiChatClient::send_message() → model={} contents={}",
            self.model,
            payload.contents.len()
        );

        let resp = self.http
            .post(self.generate_url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&payload)
            .send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(provider_error(status.as_u16(), &body));
        }
        debug!("Gemini raw response: {}", body);

        let parsed: GenerateContentResponse = serde_json
            ::from_str(&body)
            .map_err(|e| RelayError::Decode(e.to_string()))?;
        let text = extract_text(parsed)?;
        Ok(CompletionResponse { response: text })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}
