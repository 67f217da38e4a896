//! Token types and utilities for text analysis.
//!
//! A [`Token`] is the normalized unit that both query text (answers, ground
//! truth labels) and document text are reduced to. Tokens compare by their
//! normalized `text`; the offsets point back into the text they were cut from.
//!
//! # Examples
//!
//! ```
//! use evidentia::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 1, 6, 11);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.end_offset, 11);
//!
//! // Byte and character offsets diverge once the text leaves ASCII.
//! let token = Token::with_offsets("été", 0, 2, 7).with_char_offsets(2, 5);
//! assert_eq!(token.char_len(), 3);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
///
/// # Fields
///
/// - `text` - The token's text content (normalized once it leaves the analyzer)
/// - `position` - Position in the token stream (0-based)
/// - `start_offset` / `end_offset` - Byte offsets in the original text
/// - `char_start` / `char_end` - Character offsets in the original text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the original token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// The character offset where this token starts in the original text
    pub char_start: usize,

    /// The character offset where this token ends in the original text
    pub char_end: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            char_start: 0,
            char_end: 0,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    ///
    /// Character offsets default to the byte offsets, which only holds for
    /// ASCII text; see [`Token::with_char_offsets`].
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            char_start: start_offset,
            char_end: end_offset,
        }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the character offsets.
    pub fn with_char_offsets(mut self, char_start: usize, char_end: usize) -> Self {
        self.char_start = char_start;
        self.char_end = char_end;
        self
    }

    /// Number of characters the token covers in the original text.
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_start
    }

    /// Clone this token with updated text, keeping its offsets.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
