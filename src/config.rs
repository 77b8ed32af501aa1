//! Chatbot configuration
//!
//! One explicit object handed to constructors at startup. Library code never
//! reads the process environment outside `ChatbotConfig::from_env`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::ModelBackend;
use crate::error::{ChatbotError, Result};

pub const DEFAULT_TEST_ROOT: &str = "./coverity_test/src/test/java/com/example/";
pub const DEFAULT_SRC_ROOT: &str = "./coverity_test/src/main/java/com/example/";
pub const DEFAULT_TEST_TYPE: &str = "junit5 test";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    /// Which completion provider backs the chatbot
    pub backend: ModelBackend,
    /// Separate backend for test-code generation; `None` reuses `backend`
    pub test_backend: Option<ModelBackend>,
    /// API key for hosted backends; ignored by Ollama
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Overrides the backend's default model name
    pub model: Option<String>,
    pub ollama_url: String,
    /// Test framework label interpolated into the generation prompt
    pub test_type: String,
    /// Directory generated tests are written to
    pub test_root: PathBuf,
    /// Directory source snippets are written to
    pub src_root: PathBuf,
    /// Per-request timeout for completion calls; `None` waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::default(),
            test_backend: None,
            api_key: None,
            model: None,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            test_type: DEFAULT_TEST_TYPE.to_string(),
            test_root: PathBuf::from(DEFAULT_TEST_ROOT),
            src_root: PathBuf::from(DEFAULT_SRC_ROOT),
            request_timeout_secs: None,
        }
    }
}

impl ChatbotConfig {
    /// Build from environment variables, falling back to defaults
    ///
    /// - `CHATBOT_BACKEND`: gpt | llama | codellama
    /// - `CHATBOT_TEST_BACKEND`: backend for test generation only
    /// - `OPENAI_API_KEY`
    /// - `CHATBOT_MODEL`, `OLLAMA_URL`
    /// - `CHATBOT_TEST_ROOT`, `CHATBOT_SRC_ROOT`, `CHATBOT_TEST_TYPE`
    /// - `CHATBOT_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(backend) = std::env::var("CHATBOT_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Ok(backend) = std::env::var("CHATBOT_TEST_BACKEND") {
            config.test_backend = Some(backend.parse()?);
        }
        config.api_key = std::env::var("OPENAI_API_KEY").ok();
        config.model = std::env::var("CHATBOT_MODEL").ok();
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            config.ollama_url = url;
        }
        if let Ok(root) = std::env::var("CHATBOT_TEST_ROOT") {
            config.test_root = PathBuf::from(root);
        }
        if let Ok(root) = std::env::var("CHATBOT_SRC_ROOT") {
            config.src_root = PathBuf::from(root);
        }
        if let Ok(test_type) = std::env::var("CHATBOT_TEST_TYPE") {
            config.test_type = test_type;
        }
        if let Ok(secs) = std::env::var("CHATBOT_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| {
                ChatbotError::Config(format!("CHATBOT_TIMEOUT_SECS '{}': {}", secs, e))
            })?;
            config.request_timeout_secs = Some(secs);
        }

        Ok(config)
    }

    /// Load from a YAML file. Missing keys take their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ChatbotError::io(path, e))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| ChatbotError::Config(e.to_string()))
    }

    pub fn with_backend(mut self, backend: ModelBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_test_backend(mut self, backend: ModelBackend) -> Self {
        self.test_backend = Some(backend);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Model name after applying the override
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
