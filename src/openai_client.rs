//! OpenAI Client
//!
//! LLM client implementation for the OpenAI chat completions API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::llm_client::{ChatMessage, LlmClient};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
}

impl OpenAiClient {
    /// Create a client for a specific model
    pub fn new(api_key: String, model: &str) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            model: model.to_string(),
        }
    }

    /// Create with a request timeout applied to every call
    pub fn with_timeout(api_key: String, model: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            api_key,
            client,
            model: model.to_string(),
        })
    }

    /// Internal API call implementation
    async fn call_api(&self, messages: &[ChatMessage], json_mode: bool) -> Result<String> {
        let mut body = serde_json::json!({
            "model": &self.model,
            "messages": messages,
            "temperature": 0,
            "stream": false
        });

        if json_mode {
            body["response_format"] = serde_json::json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("OpenAI API error {}: {}", status, body));
        }

        #[derive(Deserialize)]
        struct Message {
            content: Option<String>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        let api_response: ApiResponse = response.json().await?;
        api_response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|content| content.trim().to_string())
            .ok_or_else(|| anyhow!("OpenAI returned no choices"))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.call_api(messages, false).await
    }

    async fn complete_json(&self, messages: &[ChatMessage]) -> Result<String> {
        self.call_api(messages, true).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}
