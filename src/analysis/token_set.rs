//! Ordered token sequences extracted from query text.
//!
//! A [`TokenSet`] keeps the normalized tokens of an answer or ground truth in
//! the order they were written, duplicates included. The ordered matching
//! strategy consumes the full sequence; the other strategies work on
//! [`TokenSet::distinct`].

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// Normalized tokens of a piece of query text, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    /// Wrap already-normalized tokens.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenSet {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Analyze `text` and collect its token texts.
    pub fn from_text(analyzer: &dyn Analyzer, text: &str) -> Result<Self> {
        let tokens = analyzer.analyze(text)?.map(|token| token.text).collect();
        Ok(TokenSet { tokens })
    }

    /// Number of tokens, duplicates included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Distinct tokens in first-occurrence order.
    pub fn distinct(&self) -> Vec<&str> {
        let mut seen = AHashSet::with_capacity(self.tokens.len());
        self.iter().filter(|token| seen.insert(*token)).collect()
    }

    /// Distinct tokens of `self` that never occur in `other`, in
    /// first-occurrence order.
    ///
    /// This is how ground-truth tokens the answer failed to mention are
    /// selected for the missing-match highlight.
    pub fn difference(&self, other: &TokenSet) -> TokenSet {
        let other: AHashSet<&str> = other.iter().collect();
        TokenSet::new(
            self.distinct()
                .into_iter()
                .filter(|token| !other.contains(token)),
        )
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
