use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub mode: ResponseMode,
}

impl CompletionRequest {
    pub fn json(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            mode: ResponseMode::Json,
        }
    }
}

/// A generative text model. Non-deterministic and unreliable: callers must
/// expect provider errors and text that is not what they asked for.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}

/// Chat completions against any OpenAI-compatible endpoint (Groq by default).
pub struct OpenAiCompletionService {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiCompletionService {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.llm_api_base.clone())
            .with_api_key(config.llm_api_key.expose_secret().to_string());

        Self {
            client: Client::with_config(openai_config),
            model: config.llm_model.clone(),
            temperature: config.llm_temperature,
        }
    }

    fn build_payload(&self, request: &CompletionRequest) -> Value {
        let mut payload = json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt }
            ]
        });

        if request.mode == ResponseMode::Json {
            payload["response_format"] = json!({ "type": "json_object" });
        }

        payload
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let payload = self.build_payload(&request);

        log::debug!("Requesting completion from model {}", self.model);

        let response: Value = self.client.chat().create_byot(payload).await.map_err(|e| {
            log::error!("Completion request to {} failed: {}", self.model, e);
            AppError::from(e)
        })?;

        extract_message_content(&response)
    }
}

/// Pulls the first choice's message text out of a chat completion body.
pub fn extract_message_content(response: &Value) -> AppResult<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|content| !content.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::ProviderError("Completion response contained no message content".to_string())
        })
}
