//! Intent Router
//!
//! Classifies a free-text question into one of the five intents with a single
//! JSON-mode completion call. The reply must be `{"route": "<intent>"}`.

use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ChatbotError, Result};
use crate::intent::Intent;
use crate::llm_client::{ChatMessage, LlmClient};

/// Expected router reply; any other shape is rejected
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteReply {
    route: String,
}

pub struct IntentRouter {
    client: Arc<dyn LlmClient>,
}

impl IntentRouter {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Classify `question`. No retry, no fallback intent.
    pub async fn route(&self, question: &str) -> Result<Intent> {
        let messages = [
            ChatMessage::system(Self::build_system_prompt()),
            ChatMessage::user(question),
        ];

        let raw = self
            .client
            .complete_json(&messages)
            .await
            .map_err(|e| ChatbotError::provider(self.client.provider_name(), e))?;

        let intent = Self::parse_reply(&raw)?;
        tracing::debug!(intent = %intent, model = self.client.model_name(), "Routed question");
        Ok(intent)
    }

    pub fn build_system_prompt() -> String {
        let tools = [
            Intent::PlainAnswer,
            Intent::CodeRefactor,
            Intent::CodeReview,
            Intent::GenerateTestCode,
            Intent::CheckConvention,
        ]
        .iter()
        .map(|i| format!("`{}`", i.label()))
        .collect::<Vec<_>>()
        .join(", ");

        format!(
            r#"You must choose the source used to answer the user's question.
If the question is about code refactoring, use {refactor}.
If the question is about code review, use {review}.
If the question is about test code, use {test}.
If the question is about code conventions, use {convention}.
For any other question, answer with {plain}.
Choose exactly one of {tools} for the given question.
State which of {tools} you chose.
Answer with a JSON object containing only the `route` key. Do not produce any other text or explanation."#,
            refactor = Intent::CodeRefactor,
            review = Intent::CodeReview,
            test = Intent::GenerateTestCode,
            convention = Intent::CheckConvention,
            plain = Intent::PlainAnswer,
            tools = tools,
        )
    }

    /// Parse the structured reply and normalize the label into an `Intent`
    pub fn parse_reply(raw: &str) -> Result<Intent> {
        let json = Self::extract_json(raw);
        let reply: RouteReply =
            serde_json::from_str(json).map_err(|e| ChatbotError::MalformedRouteResponse {
                reason: e.to_string(),
                raw: raw.to_string(),
            })?;
        reply.route.parse()
    }

    /// Strip a surrounding ```json ... ``` fence if the model added one
    fn extract_json(text: &str) -> &str {
        let text = text.trim();

        let json = if text.contains("```json") {
            text.split("```json")
                .nth(1)
                .and_then(|s| s.split("```").next())
                .unwrap_or(text)
        } else if text.contains("```") {
            text.split("```")
                .nth(1)
                .and_then(|s| s.split("```").next())
                .unwrap_or(text)
        } else {
            text
        };

        json.trim()
    }
}
