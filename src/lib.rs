//! LLM-powered code assistant
//!
//! Routes a question about one source snippet to review, refactor,
//! convention-check, test-generation or a plain answer, and returns the
//! answer tagged with the intent that produced it.
//!
//! ## Architecture
//!
//! ```text
//! Question → IntentRouter → handlers::dispatch → ResponseComposer → ChatResponse
//!                                      └──────→ TestCodeGenerator → ChatResponse
//! ```
//!
//! ## Backend Selection
//!
//! `ChatbotConfig::backend` (or `CHATBOT_BACKEND`):
//! - `gpt` (default): OpenAI API, needs `OPENAI_API_KEY`
//! - `llama`, `codellama`: local Ollama

// LLM client abstraction
pub mod backend;
pub mod client_factory;
pub mod llm_client;
pub mod ollama_client;
pub mod openai_client;

// Core chatbot modules
pub mod chatbot;
pub mod composer;
pub mod config;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod router;
pub mod session;
pub mod testgen;

// Re-exports for convenience
pub use backend::ModelBackend;
pub use chatbot::{ChatResponse, CodeChatbot};
pub use client_factory::create_llm_client;
pub use config::ChatbotConfig;
pub use error::{ChatbotError, Result};
pub use intent::{Category, Intent};
pub use llm_client::{ChatMessage, LlmClient, Role};
pub use session::{Conversation, SessionState, Turn};
