//! Code Chatbot
//!
//! Main entry point. Runs one question through the routing state machine:
//!
//! ```text
//! Routing → CodeReview | CodeRefactor | CheckConvention → Composing → Done
//! Routing → PlainAnswer → Composing → Done
//! Routing → TestGeneration → Done
//! ```
//!
//! The category is fixed by the first routing decision and never changes.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::client_factory::{create_llm_client, create_llm_client_for};
use crate::composer::ResponseComposer;
use crate::config::ChatbotConfig;
use crate::error::Result;
use crate::handlers::{self, Dispatch};
use crate::intent::{Category, Intent};
use crate::llm_client::LlmClient;
use crate::router::IntentRouter;
use crate::session::{Conversation, SessionState, Turn};
use crate::testgen::TestCodeGenerator;

/// Answer to one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub question: String,
    pub generation: String,
    pub category: Option<Category>,
}

/// States of a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Routing,
    CodeReview,
    CodeRefactor,
    CheckConvention,
    PlainAnswer,
    TestGeneration,
    Composing,
    Done,
}

impl From<Intent> for FlowState {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::CodeReview => FlowState::CodeReview,
            Intent::CodeRefactor => FlowState::CodeRefactor,
            Intent::CheckConvention => FlowState::CheckConvention,
            Intent::GenerateTestCode => FlowState::TestGeneration,
            Intent::PlainAnswer => FlowState::PlainAnswer,
        }
    }
}

pub struct CodeChatbot {
    session: SessionState,
    router: IntentRouter,
    composer: ResponseComposer,
    test_generator: TestCodeGenerator,
}

impl CodeChatbot {
    /// Build with the provider selected by `config.backend`
    ///
    /// When `config.test_backend` is set, test generation gets its own client
    /// on that backend; routing and composing stay on `config.backend`.
    pub fn new(config: &ChatbotConfig, session: SessionState) -> Result<Self> {
        let client = create_llm_client(config)?;
        let mut chatbot = Self::with_client(client, config, session);
        if let Some(test_backend) = config.test_backend {
            let test_client = create_llm_client_for(test_backend.id(), config)?;
            chatbot.test_generator = TestCodeGenerator::new(test_client, config);
        }
        Ok(chatbot)
    }

    /// Build with a specific LLM client; router, composer and generator share it
    pub fn with_client(
        client: Arc<dyn LlmClient>,
        config: &ChatbotConfig,
        session: SessionState,
    ) -> Self {
        Self {
            session,
            router: IntentRouter::new(client.clone()),
            composer: ResponseComposer::new(client.clone()),
            test_generator: TestCodeGenerator::new(client, config),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn router(&self) -> &IntentRouter {
        &self.router
    }

    pub fn test_generator(&self) -> &TestCodeGenerator {
        &self.test_generator
    }

    /// Answer one question
    pub async fn invoke(&self, question: &str) -> Result<ChatResponse> {
        let session_id = self.session.session_id;
        tracing::debug!(%session_id, state = ?FlowState::Routing, "Handling question");

        let intent = self.router.route(question).await?;
        tracing::debug!(%session_id, state = ?FlowState::from(intent), %intent, "Dispatching");

        let response = match handlers::dispatch(intent, question, &self.session) {
            Dispatch::Compose(request) => {
                tracing::debug!(%session_id, state = ?FlowState::Composing, "Composing answer");
                let generation = self
                    .composer
                    .compose(&request.question, &request.context, request.category)
                    .await?;
                ChatResponse {
                    question: request.question,
                    generation,
                    category: request.category,
                }
            }
            Dispatch::GenerateTest { question, snippet } => {
                let generated = self.test_generator.generate_test(&snippet).await?;
                ChatResponse {
                    question,
                    generation: generated.to_answer(),
                    category: Some(Category::GenerateTestCode),
                }
            }
        };

        tracing::debug!(
            %session_id,
            state = ?FlowState::Done,
            category = ?response.category,
            "Question answered"
        );
        Ok(response)
    }

    /// Answer one question and return the conversation extended by that turn
    pub async fn converse(
        &self,
        history: &Conversation,
        question: &str,
    ) -> Result<(ChatResponse, Conversation)> {
        let asked_at = Utc::now();
        let response = self.invoke(question).await?;
        let history = history.with_turn(Turn {
            question: response.question.clone(),
            answer: response.generation.clone(),
            category: response.category,
            asked_at,
        });
        Ok((response, history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ModelBackend;

    #[test]
    fn test_flow_state_for_each_intent() {
        assert_eq!(FlowState::from(Intent::CodeReview), FlowState::CodeReview);
        assert_eq!(
            FlowState::from(Intent::GenerateTestCode),
            FlowState::TestGeneration
        );
        assert_eq!(FlowState::from(Intent::PlainAnswer), FlowState::PlainAnswer);
    }

    #[test]
    fn test_test_backend_gets_its_own_client() {
        let config = ChatbotConfig::default()
            .with_api_key("sk-test")
            .with_test_backend(ModelBackend::CodeLlama);
        let session = SessionState::new("class Calculator {}", false);
        let chatbot = CodeChatbot::new(&config, session).unwrap();

        assert_eq!(chatbot.router().model_name(), "gpt-4o-mini");
        assert_eq!(chatbot.test_generator().model_name(), "codellama:7b");
    }

    #[test]
    fn test_without_test_backend_client_is_shared() {
        let config = ChatbotConfig::default().with_backend(ModelBackend::Llama);
        let session = SessionState::new("class Calculator {}", false);
        let chatbot = CodeChatbot::new(&config, session).unwrap();

        assert_eq!(chatbot.router().model_name(), "llama3:8b");
        assert_eq!(chatbot.test_generator().model_name(), "llama3:8b");
    }

    #[test]
    fn test_chatbot_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodeChatbot>();
    }
}
