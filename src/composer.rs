//! Response Composer
//!
//! Second completion call of a request: answers the question grounded on the
//! gathered context, then appends the provenance suffix for the category.

use std::sync::Arc;

use crate::error::{ChatbotError, Result};
use crate::intent::Category;
use crate::llm_client::{ChatMessage, LlmClient};

const SYSTEM_PROMPT: &str = "You are a QA chatbot that answers the user's question in detail. \
Answer the question thoroughly, using the document the user supplies as grounding.";

pub struct ResponseComposer {
    client: Arc<dyn LlmClient>,
}

impl ResponseComposer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn compose(
        &self,
        question: &str,
        context: &str,
        category: Option<Category>,
    ) -> Result<String> {
        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(Self::build_user_prompt(question, context)),
        ];

        let mut generation = self
            .client
            .complete(&messages)
            .await
            .map_err(|e| ChatbotError::provider(self.client.provider_name(), e))?;

        generation.push_str(provenance_suffix(category));
        Ok(generation)
    }

    fn build_user_prompt(question: &str, context: &str) -> String {
        format!("\nQuestion: {}.\nDocument: {}.\n", question, context)
    }
}

/// Fixed marker naming the intent that produced an answer
pub fn provenance_suffix(category: Option<Category>) -> &'static str {
    match category {
        Some(Category::CodeReview) => "\n(review)",
        Some(Category::CodeRefactor) => "\n(refactor)",
        Some(Category::CheckConvention) => "\n(convention)",
        Some(Category::GenerateTestCode) => "\n(test code)",
        None => "\n(일반)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_per_category() {
        let cases = [
            (Some(Category::CodeReview), "\n(review)"),
            (Some(Category::CodeRefactor), "\n(refactor)"),
            (Some(Category::CheckConvention), "\n(convention)"),
            (Some(Category::GenerateTestCode), "\n(test code)"),
            (None, "\n(일반)"),
        ];
        for (category, expected) in cases {
            assert_eq!(provenance_suffix(category), expected);
        }
    }

    #[test]
    fn test_user_prompt_interpolates_both_fields() {
        let prompt = ResponseComposer::build_user_prompt("why?", "int x = 1;");
        assert_eq!(prompt, "\nQuestion: why?.\nDocument: int x = 1;.\n");
    }
}
