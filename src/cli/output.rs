//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::args::{EvidentiaArgs, OutputFormat};
use crate::error::Result;
use crate::highlight::Segment;
use crate::locate::{MatchStrategy, Span};

/// Results that know how to print themselves for a terminal.
pub trait HumanReadable {
    fn to_human(&self) -> String;
}

/// One token as printed by `tokenize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenView {
    pub text: String,
    pub position: usize,
    pub start: usize,
    pub end: usize,
}

/// Result structure for tokenizing.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizeResult {
    pub tokens: Vec<TokenView>,
}

/// Result structure for highlighting one document.
#[derive(Debug, Serialize, Deserialize)]
pub struct HighlightOutput {
    pub answer_tokens: Vec<String>,
    pub missing_tokens: Vec<String>,
    pub answer_strategy: Option<MatchStrategy>,
    pub missing_strategy: Option<MatchStrategy>,
    pub answer_spans: Vec<Span>,
    pub missing_spans: Vec<Span>,
    pub segments: Vec<Segment>,
    pub rendered: String,
}

/// One highlighted supporting document.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub id: String,
    pub answer_strategy: Option<MatchStrategy>,
    pub missing_strategy: Option<MatchStrategy>,
    pub rendered: String,
}

/// Result structure for the question pipeline.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskOutput {
    pub question: String,
    pub query: String,
    pub answer: String,
    pub ground_truth: Option<String>,
    pub missing_tokens: Vec<String>,
    pub attempts: usize,
    pub context_size: usize,
    pub documents: Vec<RenderedDocument>,
}

/// Result structure for listing questions.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsResult {
    pub questions: Vec<String>,
}

impl HumanReadable for TokenizeResult {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let _ = writeln!(
                out,
                "{:>4}  {:<20} [{}, {})",
                token.position, token.text, token.start, token.end
            );
        }
        out
    }
}

impl HumanReadable for HighlightOutput {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Answer tokens: {} ({})",
            self.answer_tokens.join(" "),
            format_strategy(self.answer_strategy)
        );
        if !self.missing_tokens.is_empty() {
            let _ = writeln!(
                out,
                "Missing tokens: {} ({})",
                self.missing_tokens.join(" "),
                format_strategy(self.missing_strategy)
            );
        }
        out.push('\n');
        out.push_str(&self.rendered);
        out.push('\n');
        out
    }
}

impl HumanReadable for AskOutput {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Question: {}", self.question);
        let _ = writeln!(out, "Answer:");
        for line in self.answer.lines() {
            let _ = writeln!(out, "  {line}");
        }
        if let Some(ground_truth) = &self.ground_truth {
            let _ = writeln!(out, "Ground truth: {ground_truth}");
        }
        if !self.missing_tokens.is_empty() {
            let _ = writeln!(out, "Missing tokens: {}", self.missing_tokens.join(" "));
        }
        let _ = writeln!(
            out,
            "Attempts: {} (context size {})",
            self.attempts, self.context_size
        );

        for (i, document) in self.documents.iter().enumerate() {
            out.push('\n');
            let _ = writeln!(
                out,
                "Source {}: {} (answer: {}, missing: {})",
                i + 1,
                document.id,
                format_strategy(document.answer_strategy),
                format_strategy(document.missing_strategy)
            );
            let _ = writeln!(out, "{}", "─".repeat(40));
            let _ = writeln!(out, "{}", document.rendered);
        }
        out
    }
}

impl HumanReadable for QuestionsResult {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for question in &self.questions {
            let _ = writeln!(out, "{question}");
        }
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanReadable>(
    message: &str,
    result: &T,
    args: &EvidentiaArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanReadable>(message: &str, result: &T, args: &EvidentiaArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", result.to_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &EvidentiaArgs) -> Result<()> {
    println!("{}", format_json(result, args.pretty)?);
    Ok(())
}

fn format_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

fn format_strategy(strategy: Option<MatchStrategy>) -> String {
    match strategy {
        Some(strategy) => strategy.name().to_string(),
        None => "not found".to_string(),
    }
}
