//! Command implementations for the evidentia CLI.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::evidence::EvidenceAnalyzer;
use crate::analysis::token_set::TokenSet;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EvidentiaConfig;
use crate::dispatch::replay::ReplayGenerator;
use crate::error::{EvidentiaError, Result};
use crate::highlight::markup::{HtmlFormatter, MarkdownFormatter, SegmentFormatter};
use crate::highlight::{HighlightConfig, Highlighter};
use crate::labels::{LabelStore, clean_question};
use crate::pipeline::{EvidencePipeline, missing_tokens};

/// Execute a CLI command.
pub fn execute_command(args: EvidentiaArgs) -> Result<()> {
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize_text(tokenize_args.clone(), &args),
        Command::Highlight(highlight_args) => highlight_document(highlight_args.clone(), &args),
        Command::Ask(ask_args) => ask_question(ask_args.clone(), &args),
        Command::Questions(questions_args) => list_questions(questions_args.clone(), &args),
    }
}

/// Load the configuration file named on the command line, or the defaults.
pub fn load_config(cli_args: &EvidentiaArgs) -> Result<EvidentiaConfig> {
    match &cli_args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            EvidentiaConfig::from_file(path)
        }
        None => Ok(EvidentiaConfig::default()),
    }
}

/// Pick the formatter for the requested markup.
pub fn formatter_for(kind: MarkupKind, config: HighlightConfig) -> Box<dyn SegmentFormatter> {
    match kind {
        MarkupKind::Markdown => Box::new(MarkdownFormatter::new(config)),
        MarkupKind::Html => Box::new(HtmlFormatter::new(config)),
    }
}

/// Print the tokens of a text.
fn tokenize_text(args: TokenizeArgs, cli_args: &EvidentiaArgs) -> Result<()> {
    let analyzer = EvidenceAnalyzer::new();
    let tokens = analyzer
        .analyze(&args.text)?
        .map(|token| TokenView {
            position: token.position,
            start: token.start_offset,
            end: token.end_offset,
            text: token.text,
        })
        .collect();

    output_result("Tokens", &TokenizeResult { tokens }, cli_args)
}

/// Highlight an answer in one document.
fn highlight_document(args: HighlightArgs, cli_args: &EvidentiaArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    if let Some(limit) = args.ordered_token_limit {
        config.locator.ordered_token_limit = limit;
    }
    config.validate()?;

    let text = read_text(&args.text_file)?;
    let highlighter = Highlighter::new(config.locator.clone());
    let analyzer = highlighter.locator().analyzer().clone();

    let answer = TokenSet::from_text(analyzer.as_ref(), &args.answer)?;
    let missing = missing_tokens(analyzer.as_ref(), &answer, args.ground_truth.as_deref())?;
    let result = highlighter.highlight(&text, &answer, &missing)?;

    let formatter = formatter_for(args.markup, config.highlight.clone());
    debug!("rendering with the {} formatter", formatter.name());
    let rendered = formatter.format(&result.plan);

    output_result(
        &format!("Highlights for {}", args.text_file.display()),
        &HighlightOutput {
            answer_tokens: answer.as_slice().to_vec(),
            missing_tokens: missing.as_slice().to_vec(),
            answer_strategy: result.answer.strategy,
            missing_strategy: result.missing.strategy,
            answer_spans: result.answer.spans.into_vec(),
            missing_spans: result.missing.spans.into_vec(),
            segments: result.plan.into_segments(),
            rendered,
        },
        cli_args,
    )
}

/// Run the question pipeline against a recorded response.
fn ask_question(args: AskArgs, cli_args: &EvidentiaArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    if let Some(context_size) = args.context_size {
        config.dispatch.initial_context_size = context_size;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.dispatch.retry.max_attempts = max_attempts;
    }
    config.validate()?;

    let question = clean_question(&args.question).trim().to_string();
    if question.is_empty() {
        return Err(EvidentiaError::invalid_argument("question is empty"));
    }

    let ground_truth = lookup_ground_truth(&args, &question)?;
    let generator = ReplayGenerator::from_file(&args.responses)?;
    let pipeline = EvidencePipeline::new(generator, &config);
    let output = pipeline.answer(&question, ground_truth.as_deref())?;

    let formatter = formatter_for(args.markup, config.highlight.clone());
    let documents = output
        .documents
        .iter()
        .map(|document| RenderedDocument {
            id: document.document_id.clone(),
            answer_strategy: document.result.answer.strategy,
            missing_strategy: document.result.missing.strategy,
            rendered: formatter.format(&document.result.plan),
        })
        .collect();

    output_result(
        "Answer",
        &AskOutput {
            question,
            query: output.query,
            answer: output.answer,
            ground_truth: output.ground_truth,
            missing_tokens: output.missing_tokens.as_slice().to_vec(),
            attempts: output.attempts,
            context_size: output.context_size,
            documents,
        },
        cli_args,
    )
}

/// List the numbered datapoint questions.
fn list_questions(args: QuestionsArgs, cli_args: &EvidentiaArgs) -> Result<()> {
    let store = LabelStore::from_files(&args.master, None::<&Path>)?;
    output_result(
        "Questions",
        &QuestionsResult {
            questions: store.questions(),
        },
        cli_args,
    )
}

fn lookup_ground_truth(args: &AskArgs, question: &str) -> Result<Option<String>> {
    let (Some(labels), Some(master)) = (&args.labels, &args.master) else {
        return Ok(None);
    };
    let Some(doc) = &args.doc else {
        warn!("--labels given without --doc; no ground truth will be used");
        return Ok(None);
    };

    let store = LabelStore::from_files(master, Some(labels))?;
    let ground_truth = store.ground_truth(doc, question).map(str::to_string);
    if ground_truth.is_none() {
        warn!("no ground truth for {doc:?} and question {question:?}");
    }
    Ok(ground_truth)
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        EvidentiaError::invalid_argument(format!("cannot read {}: {}", path.display(), e))
    })
}
