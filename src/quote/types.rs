//! Quotation value type and the errors raised by the quote book.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single quotation: the quoted text and the person it is attributed to.
///
/// On the wire the fields are capitalized (`{"Quote": ..., "Author": ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// Quoted text.
    #[serde(rename = "Quote")]
    pub text: String,
    /// Attribution for the quoted text.
    #[serde(rename = "Author")]
    pub author: String,
}

impl Quotation {
    /// Build a quotation from any string-like text and author.
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

/// Errors returned by [`crate::quote::QuoteBook`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// The book holds no quotations.
    #[error("empty QuoteBook")]
    Empty,
    /// The requested position does not hold a quotation.
    #[error("id {index} out of bounds")]
    OutOfRange {
        /// Position requested by the caller.
        index: i64,
        /// Number of quotations stored when the lookup ran.
        len: usize,
    },
    /// The book reached its capacity and rejected the insert.
    #[error("QuoteBook is full")]
    Full {
        /// Maximum number of quotations the book accepts.
        capacity: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_capitalized_field_names() {
        let quote = Quotation::new("Eat the frog first.", "Brian Tracy");
        let json = serde_json::to_value(&quote).expect("serialize");
        assert_eq!(json["Quote"], "Eat the frog first.");
        assert_eq!(json["Author"], "Brian Tracy");

        let decoded: Quotation = serde_json::from_value(json).expect("deserialize");
        assert_eq!(decoded, quote);
    }

    #[test]
    fn decoding_requires_both_fields() {
        let err = serde_json::from_str::<Quotation>(r#"{"Quote":"orphan"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn error_messages_match_http_contract() {
        assert_eq!(QuoteError::Empty.to_string(), "empty QuoteBook");
        assert_eq!(
            QuoteError::OutOfRange { index: 7, len: 3 }.to_string(),
            "id 7 out of bounds"
        );
        assert!(
            QuoteError::Full { capacity: 20 }
                .to_string()
                .contains("full")
        );
    }
}
