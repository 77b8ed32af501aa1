//! Ollama Client
//!
//! LLM client implementation for a local Ollama server (`POST /api/chat`).
//! Backs the `llama` and `codellama` backends; no credentials required.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::llm_client::{ChatMessage, LlmClient};

/// Ollama chat API client
#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            model: model.to_string(),
        }
    }

    pub fn with_timeout(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            model: model.to_string(),
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    async fn call_api(&self, messages: &[ChatMessage], json_mode: bool) -> Result<String> {
        let mut body = serde_json::json!({
            "model": &self.model,
            "messages": messages,
            "stream": false
        });

        if json_mode {
            body["format"] = serde_json::json!("json");
        }

        let response = self
            .client
            .post(self.chat_url())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to reach Ollama at {}", self.base_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Ollama API error {}: {}", status, body));
        }

        // Response format: { "message": { "role": "assistant", "content": "..." }, "done": true }
        #[derive(Deserialize)]
        struct Message {
            content: String,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            message: Option<Message>,
        }

        let api_response: ApiResponse = response.json().await?;
        api_response
            .message
            .map(|m| m.content)
            .ok_or_else(|| anyhow!("Empty response from Ollama"))
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
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
        "Ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url_strips_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3:8b");
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
        assert_eq!(client.model_name(), "llama3:8b");
        assert_eq!(client.provider_name(), "Ollama");
    }
}
