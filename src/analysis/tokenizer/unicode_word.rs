//! Unicode word tokenizer implementation.
//!
//! Splits text using Unicode word boundary rules (UAX #29) and keeps only the
//! segments that contain at least one alphanumeric character, so punctuation
//! and whitespace never become tokens.
//!
//! # Examples
//!
//! ```
//! use evidentia::analysis::tokenizer::Tokenizer;
//! use evidentia::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[1].start_offset, 7);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
///
/// Byte offsets come straight from the segmenter, so repeated words each get
/// their own correct position in the text. Character offsets are counted
/// across every segment, including the dropped ones.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut char_offset = 0;
        let tokens: Vec<Token> = text
            .split_word_bound_indices()
            .filter_map(|(start_offset, word)| {
                let char_start = char_offset;
                char_offset += word.chars().count();
                word.chars()
                    .any(|c| c.is_alphanumeric())
                    .then_some((start_offset, word, char_start, char_offset))
            })
            .enumerate()
            .map(|(position, (start_offset, word, char_start, char_end))| {
                Token::with_offsets(word, position, start_offset, start_offset + word.len())
                    .with_char_offsets(char_start, char_end)
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
