//! Backend Selection
//!
//! Enum for selecting the model that backs the completion provider.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ChatbotError;

/// LLM backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelBackend {
    /// OpenAI GPT (default)
    #[default]
    Gpt,
    /// Llama 3 served by a local Ollama
    Llama,
    /// Code Llama served by a local Ollama
    CodeLlama,
}

impl ModelBackend {
    /// Identifier accepted by `FromStr`
    pub fn id(&self) -> &'static str {
        match self {
            ModelBackend::Gpt => "gpt",
            ModelBackend::Llama => "llama",
            ModelBackend::CodeLlama => "codellama",
        }
    }

    /// Model used when the config does not override it
    pub fn default_model(&self) -> &'static str {
        match self {
            ModelBackend::Gpt => "gpt-4o-mini",
            ModelBackend::Llama => "llama3:8b",
            ModelBackend::CodeLlama => "codellama:7b",
        }
    }

    /// Whether the backend is served through Ollama
    pub fn is_local(&self) -> bool {
        matches!(self, ModelBackend::Llama | ModelBackend::CodeLlama)
    }
}

impl FromStr for ModelBackend {
    type Err = ChatbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt" => Ok(ModelBackend::Gpt),
            "llama" => Ok(ModelBackend::Llama),
            "codellama" => Ok(ModelBackend::CodeLlama),
            _ => Err(ChatbotError::UnsupportedModel(s.to_string())),
        }
    }
}

impl TryFrom<String> for ModelBackend {
    type Error = ChatbotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelBackend> for String {
    fn from(backend: ModelBackend) -> Self {
        backend.id().to_string()
    }
}

impl std::fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("gpt".parse::<ModelBackend>().unwrap(), ModelBackend::Gpt);
        assert_eq!("GPT".parse::<ModelBackend>().unwrap(), ModelBackend::Gpt);
        assert_eq!("llama".parse::<ModelBackend>().unwrap(), ModelBackend::Llama);
        assert_eq!(
            "CodeLlama".parse::<ModelBackend>().unwrap(),
            ModelBackend::CodeLlama
        );
    }

    #[test]
    fn test_unsupported_is_error() {
        let err = "mistral".parse::<ModelBackend>().unwrap_err();
        assert!(matches!(err, ChatbotError::UnsupportedModel(ref m) if m == "mistral"));
    }

    #[test]
    fn test_default_models() {
        assert_eq!(ModelBackend::default(), ModelBackend::Gpt);
        assert_eq!(ModelBackend::Llama.default_model(), "llama3:8b");
        assert_eq!(ModelBackend::CodeLlama.default_model(), "codellama:7b");
        assert!(!ModelBackend::Gpt.is_local());
    }
}
