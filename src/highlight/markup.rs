//! Markup output for highlight plans.
//!
//! Escaping runs segment by segment after the plan is built, so an escape
//! sequence can never straddle a highlight boundary and highlighted text keeps
//! its color markers even when it contains special characters.

use lazy_static::lazy_static;
use regex::Regex;

use crate::highlight::{HighlightConfig, HighlightPlan, Segment};

lazy_static! {
    /// Characters Markdown renderers treat as syntax in running text.
    static ref MARKDOWN_SPECIAL: Regex =
        Regex::new(r"([\$\+#`\{\}])").expect("markdown escape pattern is valid");
}

/// Escape `$ + # ` { }` with a leading backslash.
pub fn escape_markdown(text: &str) -> String {
    MARKDOWN_SPECIAL.replace_all(text, r"\$1").into_owned()
}

/// Escape the characters HTML treats specially.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Turns a [`HighlightPlan`] into a string for one presentation medium.
pub trait SegmentFormatter: Send + Sync {
    /// Format a single segment.
    fn format_segment(&self, segment: &Segment) -> String;

    /// Format a whole plan.
    fn format(&self, plan: &HighlightPlan) -> String {
        plan.segments()
            .iter()
            .map(|segment| self.format_segment(segment))
            .collect()
    }

    fn name(&self) -> &'static str;
}

/// Markdown with inline HTML background colors.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    config: HighlightConfig,
}

impl MarkdownFormatter {
    pub fn new(config: HighlightConfig) -> Self {
        MarkdownFormatter { config }
    }
}

impl SegmentFormatter for MarkdownFormatter {
    fn format_segment(&self, segment: &Segment) -> String {
        let text = if self.config.escape_markup {
            escape_markdown(&segment.text)
        } else {
            segment.text.clone()
        };

        match segment.color {
            Some(color) => format!(
                "<span style=\"background-color:{};\">{}</span>",
                self.config.color_for(color),
                text
            ),
            None => text,
        }
    }

    fn name(&self) -> &'static str {
        "markdown"
    }
}

/// HTML using one tag with a class per color.
#[derive(Debug, Clone, Default)]
pub struct HtmlFormatter {
    config: HighlightConfig,
}

impl HtmlFormatter {
    pub fn new(config: HighlightConfig) -> Self {
        HtmlFormatter { config }
    }

    /// Build the opening tag for a color class.
    fn opening_tag(&self, class: &str) -> String {
        format!("<{} class=\"{}\">", self.config.tag, class)
    }

    /// Build the closing tag.
    fn closing_tag(&self) -> String {
        format!("</{}>", self.config.tag)
    }
}

impl SegmentFormatter for HtmlFormatter {
    fn format_segment(&self, segment: &Segment) -> String {
        let text = if self.config.escape_markup {
            escape_html(&segment.text)
        } else {
            segment.text.clone()
        };

        match segment.color {
            Some(color) => format!(
                "{}{}{}",
                self.opening_tag(color.class_name()),
                text,
                self.closing_tag()
            ),
            None => text,
        }
    }

    fn name(&self) -> &'static str {
        "html"
    }
}
