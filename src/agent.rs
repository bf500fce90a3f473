use crate::config::prompt::build_transcript;
use crate::llm::chat::{ ChatClient, RelayError };
use crate::models::chat::ChatRequest;

use log::info;
use std::sync::Arc;

/// Shown to the caller whenever the relay fails, with a success status.
pub const FALLBACK_REPLY: &str =
    "죄송합니다, 답변을 생성하는 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

#[derive(Clone)]
pub struct TravelAgent {
    chat_client: Arc<dyn ChatClient>,
}

impl TravelAgent {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    /// Assembles the transcript for `request` and relays it in a single attempt.
    pub async fn reply(&self, request: &ChatRequest) -> Result<String, RelayError> {
        let transcript = build_transcript(&request.history);
        info!(
            "Relaying chat turn: model={} transcript_len={} history_len={}",
            self.chat_client.get_model(),
            transcript.len(),
            request.history.len()
        );

        let completion = self.chat_client.send_message(&transcript, &request.message).await?;
        Ok(completion.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::prompt::FIXED_PREFIX_LEN;
    use crate::llm::chat::CompletionResponse;
    use crate::models::chat::{ HistoryItem, Role, TranscriptEntry };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        seen: Mutex<Vec<(Vec<TranscriptEntry>, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatClient for RecordingClient {
        async fn send_message(
            &self,
            history: &[TranscriptEntry],
            message: &str
        ) -> Result<CompletionResponse, RelayError> {
            self.seen.lock().unwrap().push((history.to_vec(), message.to_string()));
            if self.fail {
                return Err(RelayError::Transport("connection refused".into()));
            }
            Ok(CompletionResponse { response: format!("echo: {}", message) })
        }

        fn get_model(&self) -> String {
            "recording".into()
        }
    }

    #[tokio::test]
    async fn sends_message_separately_from_transcript() {
        let client = Arc::new(RecordingClient::default());
        let agent = TravelAgent::new(client.clone());
        let request = ChatRequest {
            message: "맛집 추천해줘".into(),
            history: vec![
                HistoryItem { sender: "user".into(), text: "제주도 여행 추천해줘".into() },
                HistoryItem { sender: "bot".into(), text: "제주도는...".into() },
            ],
        };

        let reply = agent.reply(&request).await.unwrap();
        assert_eq!(reply, "echo: 맛집 추천해줘");

        let seen = client.seen.lock().unwrap();
        let (history, message) = &seen[0];
        assert_eq!(history.len(), 7);
        assert_eq!(message, "맛집 추천해줘");
        assert_eq!(history[FIXED_PREFIX_LEN].role, Role::User);
        assert_eq!(history[FIXED_PREFIX_LEN + 1].role, Role::Model);
        assert!(history.iter().all(|e| e.parts[0].text != "맛집 추천해줘"));
    }

    #[tokio::test]
    async fn relay_failure_surfaces_as_error_value() {
        let agent = TravelAgent::new(Arc::new(RecordingClient { fail: true, ..Default::default() }));
        let request = ChatRequest { message: "안녕".into(), history: vec![] };

        let err = agent.reply(&request).await.unwrap_err();
        assert_eq!(err.code(), "transport_error");
    }
}
