//! All-occurrences matching: the unconditional fallback.
//!
//! Every document token equal to some query token becomes its own span. No
//! compactness guarantee; the result is empty only when no query token occurs
//! in the text at all.

use ahash::AHashSet;

use crate::analysis::token::Token;
use crate::analysis::token_set::TokenSet;
use crate::locate::{Span, SpanList};

/// One span per occurrence of any query token.
pub fn locate(doc_tokens: &[Token], tokens: &TokenSet) -> SpanList {
    let wanted: AHashSet<&str> = tokens.iter().collect();
    if wanted.is_empty() {
        return SpanList::new();
    }

    let spans = doc_tokens
        .iter()
        .filter(|token| wanted.contains(token.text.as_str()))
        .map(|token| Span::covering(token, token))
        .collect();

    SpanList::from_spans(spans)
}
