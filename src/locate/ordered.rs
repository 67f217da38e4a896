//! Ordered matching: the smallest window holding every query token in query
//! order.
//!
//! One sweep over the document tokens keeps, for every query prefix
//! `q[..=j]`, the latest document index from which that prefix can be matched
//! as a subsequence ending at or before the current token. The latest start
//! always gives the shortest window for a given end, so each time the last
//! query token matches, the window from that start is a candidate. Cost is
//! O(document tokens × query tokens) time and O(query tokens) memory.
//!
//! Window length is counted in characters, not bytes. Duplicate query tokens
//! each need their own occurrence. Among equally short windows the leftmost
//! wins.

use crate::analysis::token::Token;
use crate::analysis::token_set::TokenSet;
use crate::locate::{Span, SpanList};

/// Find the smallest in-order window, or an empty list if the tokens do not
/// all occur in that order.
pub fn locate(doc_tokens: &[Token], tokens: &TokenSet) -> SpanList {
    let query = tokens.as_slice();
    let Some(last) = query.len().checked_sub(1) else {
        return SpanList::new();
    };

    let mut latest_start: Vec<Option<usize>> = vec![None; query.len()];
    // (length in characters, window)
    let mut best: Option<(usize, Span)> = None;

    for (index, doc_token) in doc_tokens.iter().enumerate() {
        // Descending so one document token never satisfies two query slots
        for slot in (0..query.len()).rev() {
            if doc_token.text != query[slot] {
                continue;
            }

            let start = if slot == 0 {
                Some(index)
            } else {
                latest_start[slot - 1]
            };
            let Some(start) = start else {
                continue;
            };
            latest_start[slot] = Some(start);

            if slot == last {
                let first = &doc_tokens[start];
                let chars = doc_token.char_end - first.char_start;
                if best.is_none_or(|(shortest, _)| chars < shortest) {
                    best = Some((chars, Span::covering(first, doc_token)));
                }
            }
        }
    }

    best.map(|(_, span)| SpanList::from(span)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::Analyzer;
    use crate::analysis::analyzer::evidence::EvidenceAnalyzer;

    fn run(text: &str, tokens: &[&str]) -> Option<String> {
        let doc: Vec<Token> = EvidenceAnalyzer::new().analyze(text).unwrap().collect();
        let spans = locate(&doc, &TokenSet::new(tokens.iter().copied()));
        assert!(spans.len() <= 1);
        spans.iter().next().map(|s| text[s.as_range()].to_string())
    }

    #[test]
    fn test_minimal_in_order_window() {
        assert_eq!(
            run("the quick brown fox jumps", &["quick", "fox"]),
            Some("quick brown fox".to_string())
        );
    }

    #[test]
    fn test_prefers_shorter_later_window() {
        let text = "quick a b c d e fox then quick fox";
        assert_eq!(run(text, &["quick", "fox"]), Some("quick fox".to_string()));
    }

    #[test]
    fn test_latest_start_shrinks_window() {
        // Second "quick" is closer to "fox"
        let text = "quick quick fox";
        assert_eq!(run(text, &["quick", "fox"]), Some("quick fox".to_string()));
    }

    #[test]
    fn test_out_of_order_is_no_match() {
        assert_eq!(run("fox jumps quick", &["quick", "fox"]), None);
    }

    #[test]
    fn test_missing_token_is_no_match() {
        assert_eq!(run("quick brown", &["quick", "fox"]), None);
    }

    #[test]
    fn test_duplicates_need_separate_occurrences() {
        assert_eq!(run("fee only", &["fee", "fee"]), None);
        assert_eq!(
            run("fee then fee", &["fee", "fee"]),
            Some("fee then fee".to_string())
        );
    }

    #[test]
    fn test_leftmost_wins_ties() {
        let text = "a x b and a y b";
        let doc: Vec<Token> = EvidenceAnalyzer::new().analyze(text).unwrap().collect();
        let spans = locate(&doc, &TokenSet::new(["a", "b"]));
        assert_eq!(spans.as_slice(), &[Span::new(0, 5)]);
    }

    #[test]
    fn test_single_token() {
        assert_eq!(run("one two three", &["two"]), Some("two".to_string()));
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(run("one two", &[]), None);
    }

    /// Shortest in-order window by exhaustive search, in characters.
    fn brute_force_chars(text: &str, query: &[&str]) -> Option<usize> {
        let doc: Vec<Token> = EvidenceAnalyzer::new().analyze(text).unwrap().collect();
        let mut brute: Option<usize> = None;
        for i in 0..doc.len() {
            for k in i..doc.len() {
                let mut slot = 0;
                for token in &doc[i..=k] {
                    if slot < query.len() && token.text == query[slot] {
                        slot += 1;
                    }
                }
                if slot == query.len() {
                    let len = text[doc[i].start_offset..doc[k].end_offset].chars().count();
                    brute = Some(brute.map_or(len, |b| b.min(len)));
                }
            }
        }
        brute
    }

    #[test]
    fn test_window_is_minimal_against_brute_force() {
        let texts = [
            "a c b a b c a a b c b",
            "a ééé b c then a xxxx b c",
            "ö a ü b ñ c a xy b z c a ëëëë b c",
            "a 日本語 b c a bb b cc c",
        ];
        let query = ["a", "b", "c"];

        for text in texts {
            let found = run(text, &query).map(|window| window.chars().count());
            assert_eq!(found, brute_force_chars(text, &query), "{text}");
        }
    }

    #[test]
    fn test_window_length_counts_characters() {
        // 7 characters in 10 bytes beats 8 characters in 8 bytes
        let text = "a ééé b then a xxxx b";
        assert_eq!(run(text, &["a", "b"]), Some("a ééé b".to_string()));
    }
}
