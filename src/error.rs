//! Error types for the code chatbot.
//!
//! Every failure that can end a request maps to one `ChatbotError` variant.
//! Nothing is retried; errors propagate to the caller that owns the UI.

use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ChatbotError>;

#[derive(Debug, thiserror::Error)]
pub enum ChatbotError {
    /// The router's structured reply could not be parsed into `{"route": ...}`.
    #[error("Malformed route response: {reason} (raw: {raw})")]
    MalformedRouteResponse { reason: String, raw: String },

    /// The router returned a label outside the five supported intents.
    #[error("Unrecognized intent '{label}'")]
    UnrecognizedIntent { label: String },

    /// No `class <Name>` declaration in the code used to derive a save path.
    #[error("No class name found in code")]
    NoClassNameFound,

    /// Requested backend identifier is not one of gpt, llama, codellama.
    #[error("Unsupported model '{0}'. Valid values: gpt, llama, codellama")]
    UnsupportedModel(String),

    /// The completion provider call itself failed (network, auth, quota, bad payload).
    #[error("{provider} completion failed: {message}")]
    ProviderFailure { provider: String, message: String },

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChatbotError {
    /// Wrap a provider-level error, keeping the full context chain.
    pub fn provider(provider: &str, err: anyhow::Error) -> Self {
        ChatbotError::ProviderFailure {
            provider: provider.to_string(),
            message: format!("{:#}", err),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChatbotError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_failure_keeps_chain() {
        let err = anyhow::anyhow!("connection refused").context("POST /v1/chat/completions");
        let wrapped = ChatbotError::provider("OpenAI", err);
        let text = wrapped.to_string();
        assert!(text.starts_with("OpenAI completion failed"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn test_unsupported_model_message() {
        let err = ChatbotError::UnsupportedModel("mistral".to_string());
        assert!(err.to_string().contains("'mistral'"));
    }
}
