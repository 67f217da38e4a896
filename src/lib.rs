//! # Evidentia
//!
//! Locates the evidence for a generated answer inside its source documents
//! and renders it as colored highlights.
//!
//! ## Features
//!
//! - Unicode word tokenization with case folding
//! - Span location with an ordered, a compact and an all-occurrences strategy
//! - Non-overlapping answer and missing-ground-truth highlights
//! - Markdown and HTML rendering with markup-safe escaping
//! - Answer generation with a bounded, failure-aware retry policy
//!
//! ## Example
//!
//! ```
//! use evidentia::prelude::*;
//!
//! let highlighter = Highlighter::new(LocatorConfig::default());
//! let answer = tokenize("quick fox").unwrap();
//! let result = highlighter
//!     .highlight("the quick brown fox jumps", &answer, &TokenSet::default())
//!     .unwrap();
//!
//! let highlighted: Vec<&str> = result.plan.highlighted().map(|s| s.text.as_str()).collect();
//! assert_eq!(highlighted, vec!["quick brown fox"]);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod highlight;
pub mod labels;
pub mod locate;
pub mod pipeline;

pub mod prelude {
    pub use crate::analysis::{Analyzer, EvidenceAnalyzer, Token, TokenSet, tokenize};
    pub use crate::config::{DispatchConfig, EvidentiaConfig};
    pub use crate::dispatch::replay::ReplayGenerator;
    pub use crate::dispatch::{
        AnswerGenerator, FailureKind, GeneratedAnswer, GenerationError, QueryDispatcher,
        RetryPolicy,
    };
    pub use crate::document::Document;
    pub use crate::error::{EvidentiaError, Result};
    pub use crate::highlight::markup::{HtmlFormatter, MarkdownFormatter, SegmentFormatter};
    pub use crate::highlight::{
        HighlightColor, HighlightConfig, HighlightPlan, HighlightResult, Highlighter, Segment,
    };
    pub use crate::labels::LabelStore;
    pub use crate::locate::{LocatorConfig, MatchStrategy, Span, SpanList, SpanLocator};
    pub use crate::pipeline::{EvidencePipeline, PipelineOutput};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
