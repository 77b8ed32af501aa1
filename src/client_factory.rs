//! Client Factory
//!
//! Builds the completion provider selected by `ChatbotConfig::backend`.

use std::sync::Arc;

use crate::backend::ModelBackend;
use crate::config::ChatbotConfig;
use crate::error::{ChatbotError, Result};
use crate::llm_client::LlmClient;
use crate::ollama_client::OllamaClient;
use crate::openai_client::OpenAiClient;

/// Create the LLM client for the configured backend
pub fn create_llm_client(config: &ChatbotConfig) -> Result<Arc<dyn LlmClient>> {
    let model = config.model_name();
    let timeout = config.request_timeout();

    let client: Arc<dyn LlmClient> = match config.backend {
        ModelBackend::Gpt => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    ChatbotError::MissingCredential(
                        "OPENAI_API_KEY is required for the gpt backend".to_string(),
                    )
                })?;
            match timeout {
                Some(t) => Arc::new(
                    OpenAiClient::with_timeout(api_key, model, t)
                        .map_err(|e| ChatbotError::provider("OpenAI", e))?,
                ),
                None => Arc::new(OpenAiClient::new(api_key, model)),
            }
        }
        ModelBackend::Llama | ModelBackend::CodeLlama => match timeout {
            Some(t) => Arc::new(
                OllamaClient::with_timeout(&config.ollama_url, model, t)
                    .map_err(|e| ChatbotError::provider("Ollama", e))?,
            ),
            None => Arc::new(OllamaClient::new(&config.ollama_url, model)),
        },
    };

    tracing::info!(
        backend = %config.backend,
        provider = client.provider_name(),
        model = client.model_name(),
        "Created LLM client"
    );

    Ok(client)
}

/// Create a client for a backend given by identifier, e.g. "codellama"
pub fn create_llm_client_for(backend: &str, config: &ChatbotConfig) -> Result<Arc<dyn LlmClient>> {
    let backend: ModelBackend = backend.parse()?;
    let config = ChatbotConfig {
        backend,
        model: None,
        ..config.clone()
    };
    create_llm_client(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt_requires_api_key() {
        let err = create_llm_client(&ChatbotConfig::default()).err().unwrap();
        assert!(matches!(err, ChatbotError::MissingCredential(_)));
    }

    #[test]
    fn test_gpt_with_key() {
        let config = ChatbotConfig::default().with_api_key("sk-test");
        let client = create_llm_client(&config).unwrap();
        assert_eq!(client.provider_name(), "OpenAI");
        assert_eq!(client.model_name(), "gpt-4o-mini");
    }

    #[test]
    fn test_local_backends_use_ollama() {
        let config = ChatbotConfig::default().with_backend(ModelBackend::CodeLlama);
        let client = create_llm_client(&config).unwrap();
        assert_eq!(client.provider_name(), "Ollama");
        assert_eq!(client.model_name(), "codellama:7b");
    }

    #[test]
    fn test_unsupported_identifier() {
        let err = create_llm_client_for("palm", &ChatbotConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, ChatbotError::UnsupportedModel(_)));
    }

    #[test]
    fn test_identifier_drops_model_override() {
        let config = ChatbotConfig {
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        let client = create_llm_client_for("llama", &config).unwrap();
        assert_eq!(client.model_name(), "llama3:8b");
    }
}
