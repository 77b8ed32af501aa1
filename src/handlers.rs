//! Action Handlers
//!
//! Gather the data for a routed intent and tag the request with its category.
//! Review, refactor and convention are handled identically; they differ only
//! in the category they carry to the composer.

use serde::{Deserialize, Serialize};

use crate::intent::{Category, Intent};
use crate::session::SessionState;

/// A request ready for the composer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedRequest {
    pub question: String,
    /// Full stored snippet for code intents, empty for plain answers
    pub context: String,
    pub category: Option<Category>,
}

/// Where a routed question goes next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Continue to the response composer
    Compose(PreparedRequest),
    /// Hand the snippet to the test-code generator; terminates without composing
    GenerateTest { question: String, snippet: String },
}

/// Dispatch a routed question to its handler
pub fn dispatch(intent: Intent, question: &str, session: &SessionState) -> Dispatch {
    match intent {
        Intent::CodeReview | Intent::CodeRefactor | Intent::CheckConvention => {
            Dispatch::Compose(prepare_code_request(intent, question, session))
        }
        Intent::PlainAnswer => Dispatch::Compose(prepare_plain_answer(question)),
        Intent::GenerateTestCode => Dispatch::GenerateTest {
            question: question.to_string(),
            snippet: session.code().to_string(),
        },
    }
}

/// Review / refactor / convention: question unchanged, context = whole snippet
pub fn prepare_code_request(
    intent: Intent,
    question: &str,
    session: &SessionState,
) -> PreparedRequest {
    PreparedRequest {
        question: question.to_string(),
        context: session.code().to_string(),
        category: intent.category(),
    }
}

pub fn prepare_plain_answer(question: &str) -> PreparedRequest {
    PreparedRequest {
        question: question.to_string(),
        context: String::new(),
        category: None,
    }
}
