//! Evidence span location.
//!
//! Given a text body and a [`TokenSet`], the [`SpanLocator`] finds the byte
//! ranges of the text that hold those tokens. Three strategies are tried in a
//! fixed order, each one a fallback for the previous:
//!
//! 1. [`MatchStrategy::Ordered`] - smallest window holding every token in
//!    query order (skipped once the token count reaches
//!    [`LocatorConfig::ordered_token_limit`]).
//! 2. [`MatchStrategy::Compact`] - smallest window holding every distinct
//!    token in any order.
//! 3. [`MatchStrategy::AllOccurrences`] - every occurrence of every token as
//!    its own span.
//!
//! Matching happens on analyzed document tokens, so a match always starts and
//! ends on a word boundary and compares case-insensitively.
//!
//! # Examples
//!
//! ```
//! use evidentia::analysis::tokenize;
//! use evidentia::locate::{LocatorConfig, MatchStrategy, SpanLocator};
//!
//! let locator = SpanLocator::new(LocatorConfig::default());
//! let text = "the quick brown fox jumps";
//! let located = locator.locate(text, &tokenize("quick fox").unwrap()).unwrap();
//!
//! assert_eq!(located.strategy, Some(MatchStrategy::Ordered));
//! let span = located.spans.as_slice()[0];
//! assert_eq!(&text[span.as_range()], "quick brown fox");
//! ```

pub mod all;
pub mod compact;
pub mod ordered;

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::evidence::EvidenceAnalyzer;
use crate::analysis::token::Token;
use crate::analysis::token_set::TokenSet;
use crate::error::Result;

/// A half-open byte range `[start, end)` into one specific text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a new span. `start` must be strictly below `end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "empty or inverted span {start}..{end}");
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the two spans share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Span covering a run of document tokens.
    pub(crate) fn covering(first: &Token, last: &Token) -> Self {
        Span::new(first.start_offset, last.end_offset)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Start-sorted, non-overlapping spans produced by one locator invocation.
///
/// Consecutive spans `a`, `b` always satisfy `a.end <= b.start`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanList {
    spans: Vec<Span>,
}

impl SpanList {
    /// Create an empty span list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a span list from arbitrary spans, sorting them and merging any
    /// that overlap. Touching spans (`a.end == b.start`) stay separate.
    pub fn from_spans(mut spans: Vec<Span>) -> Self {
        spans.retain(|span| !span.is_empty());
        spans.sort();

        let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(current) if span.start < current.end => {
                    current.end = current.end.max(span.end);
                }
                _ => merged.push(span),
            }
        }

        SpanList { spans: merged }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    pub fn as_slice(&self) -> &[Span] {
        &self.spans
    }

    pub fn into_vec(self) -> Vec<Span> {
        self.spans
    }

    /// Total number of bytes covered.
    pub fn covered_len(&self) -> usize {
        self.spans.iter().map(Span::len).sum()
    }
}

impl From<Span> for SpanList {
    fn from(span: Span) -> Self {
        SpanList { spans: vec![span] }
    }
}

/// Matching strategy, listed in the order the locator tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// All tokens, in query order, in the smallest window.
    Ordered,
    /// All distinct tokens, any order, in the smallest window.
    Compact,
    /// Every occurrence of every token.
    AllOccurrences,
}

/// Signature shared by every strategy: analyzed document tokens and the
/// query tokens in, spans out.
pub type StrategyFn = fn(&[Token], &TokenSet) -> SpanList;

/// The fallback chain.
pub const STRATEGY_CHAIN: [MatchStrategy; 3] = [
    MatchStrategy::Ordered,
    MatchStrategy::Compact,
    MatchStrategy::AllOccurrences,
];

impl MatchStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            MatchStrategy::Ordered => "ordered",
            MatchStrategy::Compact => "compact",
            MatchStrategy::AllOccurrences => "all_occurrences",
        }
    }

    /// The function implementing this strategy.
    pub fn function(&self) -> StrategyFn {
        match self {
            MatchStrategy::Ordered => ordered::locate,
            MatchStrategy::Compact => compact::locate,
            MatchStrategy::AllOccurrences => all::locate,
        }
    }

    /// Whether this strategy is attempted for a query of `token_count` tokens.
    pub fn applies(&self, token_count: usize, config: &LocatorConfig) -> bool {
        match self {
            MatchStrategy::Ordered => token_count < config.ordered_token_limit,
            MatchStrategy::Compact | MatchStrategy::AllOccurrences => true,
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for the span locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// The ordered strategy only runs for queries with fewer tokens than this.
    ///
    /// The ordered search is O(document tokens × query tokens); long answers
    /// rarely survive verbatim in order, so they go straight to the
    /// order-free strategies.
    pub ordered_token_limit: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        LocatorConfig {
            ordered_token_limit: 20,
        }
    }
}

impl LocatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ordered strategy token limit.
    pub fn ordered_token_limit(mut self, limit: usize) -> Self {
        self.ordered_token_limit = limit;
        self
    }
}

/// Spans found for one token set plus the strategy that found them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedSpans {
    pub spans: SpanList,
    /// `None` when no strategy found anything.
    pub strategy: Option<MatchStrategy>,
}

/// Finds evidence spans by walking the strategy chain.
#[derive(Clone)]
pub struct SpanLocator {
    config: LocatorConfig,
    analyzer: Arc<dyn Analyzer>,
}

impl SpanLocator {
    /// Create a locator using the default [`EvidenceAnalyzer`].
    pub fn new(config: LocatorConfig) -> Self {
        SpanLocator {
            config,
            analyzer: Arc::new(EvidenceAnalyzer::new()),
        }
    }

    /// Create a locator with a custom analyzer. Query tokens must come from
    /// the same analyzer or they will not match.
    pub fn with_analyzer(config: LocatorConfig, analyzer: Arc<dyn Analyzer>) -> Self {
        SpanLocator { config, analyzer }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Locate `tokens` in `text`, trying each strategy until one finds spans.
    pub fn locate(&self, text: &str, tokens: &TokenSet) -> Result<LocatedSpans> {
        if tokens.is_empty() || text.is_empty() {
            return Ok(LocatedSpans::default());
        }

        debug!("highlight tokens: {:?}", tokens.as_slice());
        let doc_tokens: Vec<Token> = self.analyzer.analyze(text)?.collect();

        for strategy in STRATEGY_CHAIN {
            if !strategy.applies(tokens.len(), &self.config) {
                debug!(
                    "skipping {} strategy for {} tokens (limit {})",
                    strategy,
                    tokens.len(),
                    self.config.ordered_token_limit
                );
                continue;
            }

            let spans = (strategy.function())(&doc_tokens, tokens);
            if !spans.is_empty() {
                debug!("{} strategy found spans: {:?}", strategy, spans.as_slice());
                return Ok(LocatedSpans {
                    spans,
                    strategy: Some(strategy),
                });
            }
        }

        debug!("no token occurs in the text");
        Ok(LocatedSpans::default())
    }

    /// Run a single strategy, ignoring the fallback chain and the ordered
    /// token limit.
    pub fn locate_with(
        &self,
        strategy: MatchStrategy,
        text: &str,
        tokens: &TokenSet,
    ) -> Result<SpanList> {
        if tokens.is_empty() || text.is_empty() {
            return Ok(SpanList::new());
        }

        let doc_tokens: Vec<Token> = self.analyzer.analyze(text)?.collect();
        Ok((strategy.function())(&doc_tokens, tokens))
    }
}

impl fmt::Debug for SpanLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanLocator")
            .field("config", &self.config)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenize;

    fn locator() -> SpanLocator {
        SpanLocator::new(LocatorConfig::default())
    }

    fn texts<'a>(text: &'a str, spans: &SpanList) -> Vec<&'a str> {
        spans.iter().map(|s| &text[s.as_range()]).collect()
    }

    #[test]
    fn test_span_basics() {
        let span = Span::new(3, 8);
        assert_eq!(span.len(), 5);
        assert_eq!(span.as_range(), 3..8);
        assert!(span.overlaps(&Span::new(7, 9)));
        assert!(!span.overlaps(&Span::new(8, 9)));
        assert_eq!(span.to_string(), "[3, 8)");
        assert_eq!(Span::from(1..2), Span::new(1, 2));
    }

    #[test]
    fn test_span_list_merges_overlaps_only() {
        let list = SpanList::from_spans(vec![
            Span::new(10, 15),
            Span::new(0, 5),
            Span::new(3, 8),
            Span::new(15, 18),
        ]);

        assert_eq!(
            list.as_slice(),
            &[Span::new(0, 8), Span::new(10, 15), Span::new(15, 18)]
        );
        assert_eq!(list.covered_len(), 16);
    }

    #[test]
    fn test_span_list_nested_spans() {
        let list = SpanList::from_spans(vec![Span::new(0, 10), Span::new(2, 4)]);
        assert_eq!(list.as_slice(), &[Span::new(0, 10)]);
    }

    #[test]
    fn test_ordered_strategy_first() {
        let text = "the quick brown fox jumps";
        let located = locator().locate(text, &tokenize("quick fox").unwrap()).unwrap();

        assert_eq!(located.strategy, Some(MatchStrategy::Ordered));
        assert_eq!(texts(text, &located.spans), vec!["quick brown fox"]);
    }

    #[test]
    fn test_falls_back_to_compact_when_order_differs() {
        let text = "fox jumps quick";
        let located = locator().locate(text, &tokenize("quick fox").unwrap()).unwrap();

        assert_eq!(located.strategy, Some(MatchStrategy::Compact));
        assert_eq!(texts(text, &located.spans), vec!["fox jumps quick"]);
    }

    #[test]
    fn test_falls_back_to_all_occurrences_when_a_token_is_absent() {
        let text = "fee paid, fee waived";
        let located = locator()
            .locate(text, &tokenize("fee refunded").unwrap())
            .unwrap();

        assert_eq!(located.strategy, Some(MatchStrategy::AllOccurrences));
        assert_eq!(texts(text, &located.spans), vec!["fee", "fee"]);
    }

    #[test]
    fn test_ordered_skipped_at_token_limit() {
        // In-order text: ordered would match, but 20 tokens skips it.
        let words: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
        let text = words.join(" ");
        let tokens = TokenSet::new(words.clone());

        let located = locator().locate(&text, &tokens).unwrap();
        assert_eq!(located.strategy, Some(MatchStrategy::Compact));
        assert_eq!(located.spans.as_slice(), &[Span::new(0, text.len())]);

        let below = TokenSet::new(words[..19].to_vec());
        let located = locator().locate(&text, &below).unwrap();
        assert_eq!(located.strategy, Some(MatchStrategy::Ordered));
    }

    #[test]
    fn test_custom_ordered_limit() {
        let config = LocatorConfig::new().ordered_token_limit(2);
        let locator = SpanLocator::new(config);
        let located = locator
            .locate("a b c", &TokenSet::new(["a", "c"]))
            .unwrap();
        assert_eq!(located.strategy, Some(MatchStrategy::Compact));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let text = "Total Annual Fund Operating Expenses";
        let located = locator()
            .locate(text, &tokenize("annual FUND").unwrap())
            .unwrap();
        assert_eq!(texts(text, &located.spans), vec!["Annual Fund"]);
    }

    #[test]
    fn test_no_match_inside_words() {
        let text = "refunded amounts";
        let located = locator().locate(text, &tokenize("fund").unwrap()).unwrap();
        assert!(located.spans.is_empty());
        assert_eq!(located.strategy, None);
    }

    #[test]
    fn test_empty_inputs() {
        let located = locator().locate("some text", &TokenSet::default()).unwrap();
        assert!(located.spans.is_empty());

        let located = locator().locate("", &tokenize("text").unwrap()).unwrap();
        assert!(located.spans.is_empty());
    }

    #[test]
    fn test_locate_with_single_strategy() {
        let text = "b a b";
        let tokens = TokenSet::new(["a", "b"]);

        let all = locator()
            .locate_with(MatchStrategy::AllOccurrences, text, &tokens)
            .unwrap();
        assert_eq!(all.len(), 3);

        let ordered = locator()
            .locate_with(MatchStrategy::Ordered, text, &tokens)
            .unwrap();
        assert_eq!(ordered.as_slice(), &[Span::new(2, 5)]);
    }

    #[test]
    fn test_deterministic() {
        let text = "x fee y fee z fee";
        let tokens = tokenize("fee z").unwrap();
        let first = locator().locate(text, &tokens).unwrap();
        let second = locator().locate(text, &tokens).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_strategy_chain_order() {
        assert_eq!(
            STRATEGY_CHAIN,
            [
                MatchStrategy::Ordered,
                MatchStrategy::Compact,
                MatchStrategy::AllOccurrences
            ]
        );
        assert_eq!(MatchStrategy::AllOccurrences.to_string(), "all_occurrences");
    }
}
