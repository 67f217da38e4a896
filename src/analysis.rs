//! Text analysis for evidence matching.
//!
//! Both the query side (answers, ground-truth labels) and the document side
//! are reduced to tokens by the same [`EvidenceAnalyzer`]: Unicode word
//! segmentation, punctuation dropped, case folded.
//!
//! # Examples
//!
//! ```
//! use evidentia::analysis::tokenize;
//!
//! let tokens = tokenize("Quick, brown FOX!").unwrap();
//! assert_eq!(tokens.as_slice(), &["quick", "brown", "fox"]);
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod token_set;
pub mod tokenizer;

pub use analyzer::Analyzer;
pub use analyzer::evidence::EvidenceAnalyzer;
pub use token::{Token, TokenStream};
pub use token_set::TokenSet;

use crate::error::Result;

/// Tokenize `text` with the default [`EvidenceAnalyzer`].
///
/// The result keeps source order. Tokenizing any token it returns yields
/// exactly that token again.
pub fn tokenize(text: &str) -> Result<TokenSet> {
    TokenSet::from_text(&EvidenceAnalyzer::new(), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_punctuation_and_whitespace() {
        let tokens = tokenize("  Hello,   World!  \n\t").unwrap();
        assert_eq!(tokens.as_slice(), &["hello", "world"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" ,.; ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_is_idempotent_on_its_own_tokens() {
        let tokens = tokenize("The Fund's total annual fee was 1,250.75 USD in 2023.").unwrap();
        assert!(!tokens.is_empty());

        for token in tokens.iter() {
            let again = tokenize(token).unwrap();
            assert_eq!(again.as_slice(), &[token.to_string()]);
        }
    }

    #[test]
    fn test_tokenize_normalized_text_is_stable() {
        let first = tokenize("Net Asset Value per Share").unwrap();
        let joined = first.as_slice().join(" ");
        let second = tokenize(&joined).unwrap();
        assert_eq!(first, second);
    }
}
