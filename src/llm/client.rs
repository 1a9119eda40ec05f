use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::openai::OpenAiClient;

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Return the text of the first completion.
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
///
/// Returns `Ok(None)` when no API key is configured.
pub fn build_provider(settings: &Settings) -> Result<Option<Box<dyn LlmProvider>>> {
    let provider = settings.llm.provider.to_lowercase();
    if !matches!(provider.as_str(), "openai" | "gemini") {
        anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: openai, gemini",
            settings.llm.provider
        );
    }

    if settings.llm.api_key.trim().is_empty() {
        tracing::warn!(
            "No API key configured; set llm.api_key or {}",
            settings.llm.api_key_env_var()
        );
        return Ok(None);
    }

    let provider: Box<dyn LlmProvider> = match provider.as_str() {
        "gemini" => Box::new(GeminiClient::from_settings(settings)?),
        _ => Box::new(OpenAiClient::from_settings(settings)?),
    };
    Ok(Some(provider))
}
