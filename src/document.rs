//! Retrieved documents.
//!
//! A [`Document`] is a text body handed over by the retrieval side together
//! with an identifier (usually the source path plus a chunk or page number).
//! The highlighting core only ever reads it.

use serde::{Deserialize, Serialize};

/// A retrieved text body and its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier assigned by the retrieval side
    pub id: String,
    /// Text content of the document
    pub text: String,
}

impl Document {
    /// Create a new document.
    pub fn new<I: Into<String>, T: Into<String>>(id: I, text: T) -> Self {
        Document {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_roundtrips_through_json() {
        let doc = Document::new("prospectus.pdf#3", "Annual fund operating expenses");
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"id":"prospectus.pdf#3","text":"Annual fund operating expenses"}"#
        );

        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(parsed.len(), 30);
        assert!(!parsed.is_empty());
    }
}
