//! LLM Client Trait
//!
//! Unified interface for completion providers (OpenAI, Ollama).

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message sent to a completion provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Unified LLM client interface for all backends
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the message sequence, return raw text response
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Send the message sequence expecting a JSON object back
    /// - OpenAI: uses response_format json_object mode
    /// - Ollama: uses `format: "json"`
    async fn complete_json(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Get the model name for logging
    fn model_name(&self) -> &str;

    /// Get the provider name for logging
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_with_lowercase_role() {
        let msg = ChatMessage::system("be brief");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "be brief"}));
    }
}
