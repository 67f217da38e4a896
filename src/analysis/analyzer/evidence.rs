//! The analyzer shared by query text and document text.
//!
//! Highlighting only works when an answer token and a document token are
//! produced by the same normalization, so the locator and the tokenizer entry
//! point both go through this analyzer.
//!
//! # Examples
//!
//! ```
//! use evidentia::analysis::analyzer::Analyzer;
//! use evidentia::analysis::analyzer::evidence::EvidenceAnalyzer;
//!
//! let analyzer = EvidenceAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("The Fund's fee is 0.75%.").unwrap().collect();
//!
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["the", "fund's", "fee", "is", "0.75"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// Unicode word tokenization followed by a filter chain (lowercasing by default).
#[derive(Clone)]
pub struct EvidenceAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl EvidenceAnalyzer {
    /// Create the default analyzer: Unicode words, lowercased.
    pub fn new() -> Self {
        EvidenceAnalyzer {
            tokenizer: Arc::new(UnicodeWordTokenizer::new()),
            filters: vec![Arc::new(LowercaseFilter::new())],
        }
    }

    /// Create an analyzer with a custom tokenizer and no filters.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        EvidenceAnalyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Append a filter to the chain.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filter chain.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Default for EvidenceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for EvidenceAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        // Filters may leave empty text behind; never hand those to the locator
        let tokens: Vec<_> = tokens.filter(|token| !token.is_empty()).collect();
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "evidence"
    }
}

impl std::fmt::Debug for EvidenceAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_evidence_analyzer() {
        let analyzer = EvidenceAnalyzer::new();
        let tokens: Vec<Token> = analyzer.analyze("Hello World").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[1].start_offset, 6);
    }

    #[test]
    fn test_custom_tokenizer_without_filters() {
        let analyzer = EvidenceAnalyzer::with_tokenizer(Arc::new(UnicodeWordTokenizer::new()));
        let tokens: Vec<Token> = analyzer.analyze("Hello World").unwrap().collect();

        assert_eq!(tokens[0].text, "Hello");
        assert!(analyzer.filters().is_empty());
    }

    #[test]
    fn test_debug_lists_components() {
        let debug = format!("{:?}", EvidenceAnalyzer::new());
        assert!(debug.contains("unicode_word"));
        assert!(debug.contains("lowercase"));
    }
}
