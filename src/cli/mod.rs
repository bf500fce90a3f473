use clap::Parser;
use std::error::Error;
use std::time::Duration;

use crate::llm::LlmConfig;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Gemini Provider Args ---
    /// API key for the Gemini generative-language API. Required.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Gemini model used for chat completion.
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    /// Base URL of the Gemini REST API, without the `/models/...` suffix.
    #[arg(
        long,
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub gemini_base_url: String,

    /// Upper bound in seconds for one call to the provider. 0 disables the bound.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "60")]
    pub request_timeout_secs: u64,

    // --- General App Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:8000")]
    pub server_addr: String,

    /// The single browser origin allowed to call the API cross-origin.
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = "http://localhost:5173")]
    pub allowed_origin: String,
}

impl Args {
    pub fn llm_config(&self) -> Result<LlmConfig, Box<dyn Error + Send + Sync>> {
        let api_key = self.gemini_api_key.trim();
        if api_key.is_empty() {
            return Err("GEMINI_API_KEY is not set. Check your environment or .env file.".into());
        }
        let timeout = match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(LlmConfig {
            api_key: api_key.to_string(),
            completion_model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout,
        })
    }
}
