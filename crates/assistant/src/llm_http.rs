//! OpenAI-compatible chat completion client.

use crate::{AssistantError, ChatMessage, LanguageModel, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenAiCompatConfig {
    /// API root without the `/chat/completions` suffix
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for OpenAiCompatConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 150,
            timeout: Duration::from_secs(60),
        }
    }
}

pub struct OpenAiCompatModel {
    config: OpenAiCompatConfig,
    endpoint: String,
    client: reqwest::Client,
}

impl OpenAiCompatModel {
    pub fn new(mut config: OpenAiCompatConfig) -> Result<Self> {
        config.api_key = config.api_key.filter(|k| !k.trim().is_empty());
        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    pub fn config(&self) -> &OpenAiCompatConfig {
        &self.config
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl LanguageModel for OpenAiCompatModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or(AssistantError::NotConfigured)?;

        let start = std::time::Instant::now();
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&CompletionRequest {
                model: &self.config.model,
                messages,
                max_tokens: self.config.max_tokens,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: CompletionResponse = resp.json().await?;
        let reply = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(AssistantError::EmptyReply)?;

        tracing::debug!(
            "{} replied in {} ms",
            self.config.model,
            start.elapsed().as_millis()
        );
        Ok(reply)
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
