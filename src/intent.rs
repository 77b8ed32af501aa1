//! Intent and category types
//!
//! `Intent` is the router's output. `Category` is the tag carried by a request
//! into the composer; plain answers carry no category.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ChatbotError;

/// Classified purpose of a user question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    CodeReview,
    CodeRefactor,
    CheckConvention,
    GenerateTestCode,
    PlainAnswer,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::CodeReview,
        Intent::CodeRefactor,
        Intent::CheckConvention,
        Intent::GenerateTestCode,
        Intent::PlainAnswer,
    ];

    /// Wire label used in the router prompt and reply
    pub fn label(&self) -> &'static str {
        match self {
            Intent::CodeReview => "code_review",
            Intent::CodeRefactor => "code_refactor",
            Intent::CheckConvention => "check_convention",
            Intent::GenerateTestCode => "generate_test_code",
            Intent::PlainAnswer => "plain_answer",
        }
    }

    /// Category tag for this intent; `None` for plain answers
    pub fn category(&self) -> Option<Category> {
        match self {
            Intent::CodeReview => Some(Category::CodeReview),
            Intent::CodeRefactor => Some(Category::CodeRefactor),
            Intent::CheckConvention => Some(Category::CheckConvention),
            Intent::GenerateTestCode => Some(Category::GenerateTestCode),
            Intent::PlainAnswer => None,
        }
    }
}

impl FromStr for Intent {
    type Err = ChatbotError;

    /// Parses a router label after trimming and lowercasing it
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Intent::ALL
            .into_iter()
            .find(|intent| intent.label() == normalized)
            .ok_or(ChatbotError::UnrecognizedIntent { label: normalized })
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Category tag attached to a request once it has been routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CodeReview,
    CodeRefactor,
    CheckConvention,
    GenerateTestCode,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::CodeReview => "code_review",
            Category::CodeRefactor => "code_refactor",
            Category::CheckConvention => "check_convention",
            Category::GenerateTestCode => "generate_test_code",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
