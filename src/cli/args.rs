//! Command line argument parsing for the evidentia CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Evidentia - locate the evidence behind generated answers
#[derive(Parser, Debug, Clone)]
#[command(name = "evidentia")]
#[command(about = "Highlight where a generated answer is supported in its source documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct EvidentiaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "EVIDENTIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl EvidentiaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log level for the effective verbosity; `RUST_LOG` may still override it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the normalized tokens of a text
    Tokenize(TokenizeArgs),

    /// Highlight an answer in a single document
    Highlight(HighlightArgs),

    /// Answer a question from a recorded response and highlight its evidence
    Ask(AskArgs),

    /// List the numbered datapoint questions
    Questions(QuestionsArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Tokenize(_) => "tokenize",
            Command::Highlight(_) => "highlight",
            Command::Ask(_) => "ask",
            Command::Questions(_) => "questions",
        }
    }
}

/// Arguments for tokenizing
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Text to tokenize
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for highlighting one document
#[derive(Parser, Debug, Clone)]
pub struct HighlightArgs {
    /// File holding the document text
    #[arg(short = 't', long, value_name = "TEXT_FILE")]
    pub text_file: PathBuf,

    /// Answer text to locate
    #[arg(short, long)]
    pub answer: String,

    /// Ground truth; tokens the answer misses are highlighted separately
    #[arg(short, long)]
    pub ground_truth: Option<String>,

    /// Markup used to render the highlighted document
    #[arg(short, long, default_value = "markdown")]
    pub markup: MarkupKind,

    /// Longest token set the ordered strategy is tried for
    #[arg(long)]
    pub ordered_token_limit: Option<usize>,
}

/// Arguments for the full question pipeline
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// Recorded response file (JSON)
    #[arg(short, long, value_name = "RESPONSE_FILE")]
    pub responses: PathBuf,

    /// Question to ask
    #[arg(value_name = "QUESTION")]
    pub question: String,

    /// Document the question is about, used to look up its ground truth
    #[arg(short, long, value_name = "DOC_PATH")]
    pub doc: Option<String>,

    /// Ground-truth labels file (JSON)
    #[arg(short, long, value_name = "LABELS_FILE", requires = "master")]
    pub labels: Option<PathBuf>,

    /// Datapoint master file (JSON)
    #[arg(long, value_name = "MASTER_FILE")]
    pub master: Option<PathBuf>,

    /// Markup used to render the highlighted documents
    #[arg(long, default_value = "markdown")]
    pub markup: MarkupKind,

    /// Documents passed as context on the first attempt
    #[arg(long)]
    pub context_size: Option<usize>,

    /// Maximum number of generation attempts
    #[arg(long)]
    pub max_attempts: Option<usize>,
}

/// Arguments for listing questions
#[derive(Parser, Debug, Clone)]
pub struct QuestionsArgs {
    /// Datapoint master file (JSON)
    #[arg(short, long, value_name = "MASTER_FILE")]
    pub master: PathBuf,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Markup for rendered documents
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    /// Markdown with inline colored spans
    Markdown,
    /// HTML with `<mark>` elements
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_command() {
        let args = EvidentiaArgs::try_parse_from(["evidentia", "tokenize", "Hello World"]).unwrap();

        if let Command::Tokenize(tokenize_args) = args.command {
            assert_eq!(tokenize_args.text, "Hello World");
        } else {
            panic!("Expected Tokenize command");
        }
    }

    #[test]
    fn test_highlight_command() {
        let args = EvidentiaArgs::try_parse_from([
            "evidentia",
            "highlight",
            "--text-file",
            "doc.txt",
            "--answer",
            "0.50%",
            "--ground-truth",
            "net 0.50%",
            "--markup",
            "html",
        ])
        .unwrap();

        if let Command::Highlight(highlight_args) = args.command {
            assert_eq!(highlight_args.text_file, PathBuf::from("doc.txt"));
            assert_eq!(highlight_args.answer, "0.50%");
            assert_eq!(highlight_args.ground_truth.as_deref(), Some("net 0.50%"));
            assert_eq!(highlight_args.markup, MarkupKind::Html);
            assert_eq!(highlight_args.ordered_token_limit, None);
        } else {
            panic!("Expected Highlight command");
        }
    }

    #[test]
    fn test_ask_command() {
        let args = EvidentiaArgs::try_parse_from([
            "evidentia",
            "--config",
            "evidentia.json",
            "ask",
            "--responses",
            "response.json",
            "What is the fee?",
            "--doc",
            "fund_a.pdf",
            "--labels",
            "labels.json",
            "--master",
            "master.json",
            "--context-size",
            "2",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("evidentia.json")));
        if let Command::Ask(ask_args) = args.command {
            assert_eq!(ask_args.responses, PathBuf::from("response.json"));
            assert_eq!(ask_args.question, "What is the fee?");
            assert_eq!(ask_args.doc.as_deref(), Some("fund_a.pdf"));
            assert_eq!(ask_args.labels, Some(PathBuf::from("labels.json")));
            assert_eq!(ask_args.master, Some(PathBuf::from("master.json")));
            assert_eq!(ask_args.markup, MarkupKind::Markdown);
            assert_eq!(ask_args.context_size, Some(2));
            assert_eq!(ask_args.max_attempts, None);
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_labels_require_master() {
        let result = EvidentiaArgs::try_parse_from([
            "evidentia",
            "ask",
            "--responses",
            "response.json",
            "q",
            "--labels",
            "labels.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let args = EvidentiaArgs::try_parse_from(["evidentia", "tokenize", "x"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = EvidentiaArgs::try_parse_from(["evidentia", "-vv", "tokenize", "x"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = EvidentiaArgs::try_parse_from(["evidentia", "--quiet", "tokenize", "x"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_log_levels() {
        let level = |argv: &[&str]| {
            EvidentiaArgs::try_parse_from(argv.iter().copied())
                .unwrap()
                .log_level()
        };

        assert_eq!(level(&["evidentia", "-q", "-vvv", "tokenize", "x"]), LevelFilter::Error);
        assert_eq!(level(&["evidentia", "tokenize", "x"]), LevelFilter::Warn);
        assert_eq!(level(&["evidentia", "-vv", "tokenize", "x"]), LevelFilter::Info);
        assert_eq!(level(&["evidentia", "-vvvv", "tokenize", "x"]), LevelFilter::Debug);
    }

    #[test]
    fn test_command_names() {
        let args = EvidentiaArgs::try_parse_from(["evidentia", "questions", "-m", "m.json"]).unwrap();
        assert_eq!(args.command.name(), "questions");

        let args = EvidentiaArgs::try_parse_from(["evidentia", "tokenize", "x"]).unwrap();
        assert_eq!(args.command.name(), "tokenize");
    }

    #[test]
    fn test_output_format() {
        let args =
            EvidentiaArgs::try_parse_from(["evidentia", "--format", "json", "--pretty", "tokenize", "x"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }
}
