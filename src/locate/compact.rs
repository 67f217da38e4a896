//! Compact matching: the smallest window holding every distinct query token,
//! in any order.
//!
//! A sliding window over the document tokens that match some query token.
//! The right edge grows until every distinct token is covered, then the left
//! edge shrinks while coverage holds. Linear in the number of document tokens.
//! Window length is counted in characters, not bytes. Among equally short
//! windows the leftmost wins.

use ahash::AHashMap;

use crate::analysis::token::Token;
use crate::analysis::token_set::TokenSet;
use crate::locate::{Span, SpanList};

/// Find the smallest any-order window, or an empty list if some token never
/// occurs.
pub fn locate(doc_tokens: &[Token], tokens: &TokenSet) -> SpanList {
    let distinct = tokens.distinct();
    if distinct.is_empty() {
        return SpanList::new();
    }

    let slots: AHashMap<&str, usize> = distinct
        .iter()
        .enumerate()
        .map(|(slot, token)| (*token, slot))
        .collect();

    // (document index, query slot) for every relevant document token
    let hits: Vec<(usize, usize)> = doc_tokens
        .iter()
        .enumerate()
        .filter_map(|(index, token)| slots.get(token.text.as_str()).map(|&slot| (index, slot)))
        .collect();

    let mut counts = vec![0usize; distinct.len()];
    let mut covered = 0;
    let mut left = 0;
    let mut best: Option<(usize, Span)> = None;

    for right in 0..hits.len() {
        let (_, slot) = hits[right];
        if counts[slot] == 0 {
            covered += 1;
        }
        counts[slot] += 1;

        while covered == distinct.len() {
            let first = &doc_tokens[hits[left].0];
            let last = &doc_tokens[hits[right].0];
            let chars = last.char_end - first.char_start;
            if best.is_none_or(|(shortest, _)| chars < shortest) {
                best = Some((chars, Span::covering(first, last)));
            }

            let (_, left_slot) = hits[left];
            counts[left_slot] -= 1;
            if counts[left_slot] == 0 {
                covered -= 1;
            }
            left += 1;
        }
    }

    best.map(|(_, span)| SpanList::from(span)).unwrap_or_default()
}
