//! Token filter implementations for text analysis.
//!
//! Filters receive a token stream from a tokenizer (or from a previous
//! filter) and produce a new stream. Offsets are never changed by a filter,
//! so normalized tokens still point at their original text.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Case-folds token text

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// # Examples
///
/// ```
/// use evidentia::analysis::token::{Token, TokenStream};
/// use evidentia::analysis::token_filter::Filter;
/// use evidentia::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
