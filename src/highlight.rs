//! Highlight rendering for evidence spans.
//!
//! Two span lists are painted onto one text body: spans supporting the
//! generated answer and spans holding ground-truth tokens the answer missed.
//! The result is a [`HighlightPlan`], an ordered list of typed [`Segment`]s
//! that concatenate back to the original text. Turning segments into markup
//! is left to a [`markup::SegmentFormatter`].
//!
//! Where an answer span and a missing span cover the same bytes, the answer
//! color wins and the missing span is clipped around it.

pub mod markup;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::token_set::TokenSet;
use crate::error::{EvidentiaError, Result};
use crate::locate::{LocatedSpans, LocatorConfig, Span, SpanList, SpanLocator};

/// Color class attached to a highlighted segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightColor {
    /// Evidence for the generated answer.
    AnswerMatch,
    /// Ground-truth vocabulary the answer did not contain.
    MissingMatch,
}

impl HighlightColor {
    /// CSS-style class name for this color.
    pub fn class_name(&self) -> &'static str {
        match self {
            HighlightColor::AnswerMatch => "answer-match",
            HighlightColor::MissingMatch => "missing-match",
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Configuration for highlight markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Background color for answer evidence (Markdown output).
    pub answer_color: String,
    /// Background color for missed ground-truth tokens (Markdown output).
    pub missing_color: String,
    /// HTML tag wrapping highlighted segments (HTML output).
    pub tag: String,
    /// Escape characters the target markup treats specially.
    pub escape_markup: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            answer_color: "#90EE90".to_string(),
            missing_color: "red".to_string(),
            tag: "mark".to_string(),
            escape_markup: true,
        }
    }
}

impl HighlightConfig {
    /// Create a new highlight configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer evidence color.
    pub fn answer_color<S: Into<String>>(mut self, color: S) -> Self {
        self.answer_color = color.into();
        self
    }

    /// Set the missed ground-truth color.
    pub fn missing_color<S: Into<String>>(mut self, color: S) -> Self {
        self.missing_color = color.into();
        self
    }

    /// Set the HTML tag.
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = tag.into();
        self
    }

    /// Enable or disable markup escaping.
    pub fn escape_markup(mut self, escape: bool) -> Self {
        self.escape_markup = escape;
        self
    }

    /// Color string for a highlight class.
    pub fn color_for(&self, color: HighlightColor) -> &str {
        match color {
            HighlightColor::AnswerMatch => &self.answer_color,
            HighlightColor::MissingMatch => &self.missing_color,
        }
    }
}

/// A run of text with at most one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// The text of this segment, unescaped.
    pub text: String,
    /// `None` for text that passes through untouched.
    pub color: Option<HighlightColor>,
    /// Byte offset of the segment in the original text.
    pub start: usize,
    /// Byte offset one past the segment in the original text.
    pub end: usize,
}

impl Segment {
    fn slice(text: &str, span: Span, color: Option<HighlightColor>) -> Self {
        Segment {
            text: text[span.as_range()].to_string(),
            color,
            start: span.start,
            end: span.end,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.color.is_some()
    }
}

/// The original text split into plain and colored segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightPlan {
    segments: Vec<Segment>,
}

impl HighlightPlan {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Colored segments only.
    pub fn highlighted(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_highlighted())
    }

    /// Concatenation of all segments; always equals the rendered text.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn has_highlights(&self) -> bool {
        self.segments.iter().any(Segment::is_highlighted)
    }
}

/// Paints answer and missing span lists onto a text body.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightRenderer;

impl HighlightRenderer {
    pub fn new() -> Self {
        HighlightRenderer
    }

    /// Merge both span lists into non-overlapping colored segments.
    ///
    /// Fails only when a span does not fit `text` (out of bounds or not on a
    /// `char` boundary), which means the spans were computed for another text.
    pub fn render(&self, text: &str, answer: &SpanList, missing: &SpanList) -> Result<HighlightPlan> {
        for span in answer.iter().chain(missing.iter()) {
            Self::check_span(text, span)?;
        }

        let mut regions: Vec<(Span, HighlightColor)> = answer
            .iter()
            .map(|span| (*span, HighlightColor::AnswerMatch))
            .collect();
        for span in missing.iter() {
            regions.extend(
                Self::subtract(*span, answer.as_slice())
                    .into_iter()
                    .map(|piece| (piece, HighlightColor::MissingMatch)),
            );
        }
        regions.sort_by_key(|(span, _)| span.start);

        let mut segments = Vec::with_capacity(regions.len() * 2 + 1);
        let mut cursor = 0;
        for (span, color) in regions {
            if span.start > cursor {
                segments.push(Segment::slice(text, Span::new(cursor, span.start), None));
            }
            segments.push(Segment::slice(text, span, Some(color)));
            cursor = span.end;
        }
        if cursor < text.len() {
            segments.push(Segment::slice(text, Span::new(cursor, text.len()), None));
        }

        Ok(HighlightPlan { segments })
    }

    /// Parts of `span` not covered by any span in `cover` (sorted, disjoint).
    fn subtract(span: Span, cover: &[Span]) -> Vec<Span> {
        let mut pieces = Vec::new();
        let mut cursor = span.start;

        for blocker in cover.iter().filter(|blocker| blocker.overlaps(&span)) {
            if blocker.start > cursor {
                pieces.push(Span::new(cursor, blocker.start));
            }
            cursor = cursor.max(blocker.end);
        }
        if cursor < span.end {
            pieces.push(Span::new(cursor, span.end));
        }

        pieces
    }

    fn check_span(text: &str, span: &Span) -> Result<()> {
        if span.is_empty()
            || span.end > text.len()
            || !text.is_char_boundary(span.start)
            || !text.is_char_boundary(span.end)
        {
            return Err(EvidentiaError::invalid_argument(format!(
                "span {span} does not fit a text of {} bytes",
                text.len()
            )));
        }
        Ok(())
    }
}

/// Spans located for one document plus the plan painted from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightResult {
    pub answer: LocatedSpans,
    pub missing: LocatedSpans,
    pub plan: HighlightPlan,
}

/// Locates both token sets in a text and renders the result.
#[derive(Debug, Clone)]
pub struct Highlighter {
    locator: SpanLocator,
    renderer: HighlightRenderer,
}

impl Highlighter {
    /// Create a highlighter with the default analyzer.
    pub fn new(config: LocatorConfig) -> Self {
        Highlighter {
            locator: SpanLocator::new(config),
            renderer: HighlightRenderer::new(),
        }
    }

    /// Create a highlighter around an existing locator.
    pub fn with_locator(locator: SpanLocator) -> Self {
        Highlighter {
            locator,
            renderer: HighlightRenderer::new(),
        }
    }

    pub fn locator(&self) -> &SpanLocator {
        &self.locator
    }

    /// Locate `answer` and `missing` independently in `text` and paint both.
    pub fn highlight(
        &self,
        text: &str,
        answer: &TokenSet,
        missing: &TokenSet,
    ) -> Result<HighlightResult> {
        let answer = self.locator.locate(text, answer)?;
        let missing = self.locator.locate(text, missing)?;
        let plan = self.renderer.render(text, &answer.spans, &missing.spans)?;

        Ok(HighlightResult {
            answer,
            missing,
            plan,
        })
    }
}
