//! Test-Code Generator
//!
//! Asks the completion provider for a unit test of the stored snippet, pulls
//! the code out of the first matching fenced block and writes it under the
//! test root as `{ClassName}.java`, named after the snippet's class.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use crate::config::ChatbotConfig;
use crate::error::{ChatbotError, Result};
use crate::llm_client::{ChatMessage, LlmClient};

/// Fence patterns, tried in order; first match wins
static FENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(?s)```JAVA(.*?)```", r"(?s)```java(.*?)```", r"(?s)```(.*?)```"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

static CLASS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+([a-zA-Z_]\w*)").unwrap());

/// Marker appended to the chat answer for generated tests
pub const TEST_CODE_MARKER: &str = "(generate_test_code)";

/// Result of one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTest {
    pub code: String,
    /// File the code was written to
    pub path: PathBuf,
}

impl GeneratedTest {
    /// Chat-facing rendering: fenced java block plus the marker
    pub fn to_answer(&self) -> String {
        format!("```java\n{}\n```\n{}", self.code, TEST_CODE_MARKER)
    }
}

pub struct TestCodeGenerator {
    client: Arc<dyn LlmClient>,
    test_type: String,
    test_root: PathBuf,
    src_root: PathBuf,
}

impl TestCodeGenerator {
    pub fn new(client: Arc<dyn LlmClient>, config: &ChatbotConfig) -> Self {
        Self {
            client,
            test_type: config.test_type.clone(),
            test_root: config.test_root.clone(),
            src_root: config.src_root.clone(),
        }
    }

    pub fn test_root(&self) -> &Path {
        &self.test_root
    }

    /// Generate, extract and persist a unit test for `snippet`
    ///
    /// The file is named after the snippet's class, so a snippet without a
    /// class fails before the provider is called.
    pub async fn generate_test(&self, snippet: &str) -> Result<GeneratedTest> {
        let class = class_name(snippet)?;
        let code = self.generate_unit_test(snippet).await?;
        let path = self.save_test(&class, &code)?;
        Ok(GeneratedTest { code, path })
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Generate and extract without writing anything
    pub async fn generate_unit_test(&self, snippet: &str) -> Result<String> {
        let messages = [
            ChatMessage::system(self.build_prompt()),
            ChatMessage::user(snippet),
        ];

        let response = self
            .client
            .complete(&messages)
            .await
            .map_err(|e| ChatbotError::provider(self.client.provider_name(), e))?;

        tracing::debug!(
            model = self.client.model_name(),
            response_len = response.len(),
            "Received generated test code"
        );

        Ok(extract_code_block(&response))
    }

    fn build_prompt(&self) -> String {
        format!(
            "Generate a {} case for the following Java code.\n\
             Include all necessary imports and test multiple scenarios.\n\
             The test code should meet 100% test coverage.",
            self.test_type
        )
    }

    /// Write test code to `{test_root}/{class}.java`, overwriting
    pub fn save_test(&self, class: &str, test_code: &str) -> Result<PathBuf> {
        let path = self.test_root.join(format!("{}.java", class));
        write_code(&path, test_code)?;
        tracing::info!(path = %path.display(), "Test code saved");
        Ok(path)
    }

    /// Write a source snippet to `{src_root}/{ClassName}.java`, overwriting
    pub fn save_source(&self, code: &str) -> Result<PathBuf> {
        let path = self.src_root.join(format!("{}.java", class_name(code)?));
        write_code(&path, code)?;
        tracing::info!(path = %path.display(), "Source code saved");
        Ok(path)
    }
}

/// Pull the code out of the first fenced block; raw text if there is none
pub fn extract_code_block(text: &str) -> String {
    FENCE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| text.to_string())
}

/// First identifier following a `class` keyword
pub fn class_name(code: &str) -> Result<String> {
    CLASS_PATTERN
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(ChatbotError::NoClassNameFound)
}

/// Load a code file from disk
pub fn read_code(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| ChatbotError::io(path, e))
}

fn write_code(path: &Path, code: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ChatbotError::io(parent, e))?;
    }
    std::fs::write(path, code).map_err(|e| ChatbotError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_java_fence() {
        let text = "Here you go:\n```java\n\n  import org.junit.jupiter.api.Test;\nclass FooTest {}\n  \n```\nDone.";
        assert_eq!(
            extract_code_block(text),
            "import org.junit.jupiter.api.Test;\nclass FooTest {}"
        );
    }

    #[test]
    fn test_uppercase_fence_wins_over_later_lowercase() {
        let text = "```java\nclass Second {}\n```\n```JAVA\nclass First {}\n```";
        assert_eq!(extract_code_block(text), "class First {}");
    }

    #[test]
    fn test_untagged_fence() {
        let text = "```\nclass Plain {}\n```";
        assert_eq!(extract_code_block(text), "class Plain {}");
    }

    #[test]
    fn test_no_fence_returns_input_unchanged() {
        let text = "  class Raw {}\n";
        assert_eq!(extract_code_block(text), text);
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("public class Foo { }").unwrap(), "Foo");
        assert_eq!(
            class_name("import x;\nfinal class _Bar extends Foo {}").unwrap(),
            "_Bar"
        );
    }

    #[test]
    fn test_class_keyword_must_be_whole_word() {
        assert!(matches!(
            class_name("int subclass = 1; // classify Foo"),
            Err(ChatbotError::NoClassNameFound)
        ));
    }

    #[test]
    fn test_to_answer() {
        let generated = GeneratedTest {
            code: "class T {}".to_string(),
            path: PathBuf::from("T.java"),
        };
        assert_eq!(
            generated.to_answer(),
            "```java\nclass T {}\n```\n(generate_test_code)"
        );
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_code("/definitely/not/here/Calculator.java").unwrap_err();
        assert!(matches!(err, ChatbotError::Io { .. }));
    }
}
