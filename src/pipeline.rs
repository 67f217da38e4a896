//! Question to highlighted evidence, end to end.
//!
//! ```text
//! question ─► build_query ─► QueryDispatcher ─► extract_answer
//!                                   │                  │
//!                         supporting documents    answer tokens ─┐
//!                                   │   ground truth ─► missing ─┤
//!                                   ▼                            ▼
//!                        Highlighter per document (in parallel)
//! ```

use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::evidence::EvidenceAnalyzer;
use crate::analysis::token_set::TokenSet;
use crate::config::{DispatchConfig, EvidentiaConfig};
use crate::dispatch::{AnswerGenerator, QueryDispatcher, build_query};
use crate::document::Document;
use crate::error::Result;
use crate::highlight::{HighlightResult, Highlighter};
use crate::locate::SpanLocator;

/// Marker some models put in front of the actual answer.
pub const ANSWER_MARKER: &str = "Helpful Answer:";

/// Keep only the text after the first [`ANSWER_MARKER`], trimmed.
pub fn extract_answer(raw: &str) -> String {
    match raw.split_once(ANSWER_MARKER) {
        Some((_, answer)) => answer.trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Ground-truth tokens that the answer does not contain.
pub fn missing_tokens(
    analyzer: &dyn Analyzer,
    answer: &TokenSet,
    ground_truth: Option<&str>,
) -> Result<TokenSet> {
    match ground_truth {
        Some(label) => Ok(TokenSet::from_text(analyzer, label)?.difference(answer)),
        None => Ok(TokenSet::default()),
    }
}

/// Highlights for one supporting document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHighlight {
    pub document_id: String,
    #[serde(flatten)]
    pub result: HighlightResult,
}

/// Everything produced for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub query: String,
    pub raw_answer: String,
    pub answer: String,
    pub ground_truth: Option<String>,
    pub answer_tokens: TokenSet,
    pub missing_tokens: TokenSet,
    pub attempts: usize,
    pub context_size: usize,
    pub documents: Vec<DocumentHighlight>,
}

/// Ties the dispatcher, the analyzer and the highlighter together.
pub struct EvidencePipeline<G> {
    dispatcher: QueryDispatcher<G>,
    highlighter: Highlighter,
    analyzer: Arc<dyn Analyzer>,
    config: DispatchConfig,
}

impl<G: AnswerGenerator> EvidencePipeline<G> {
    pub fn new(generator: G, config: &EvidentiaConfig) -> Self {
        let analyzer: Arc<dyn Analyzer> = Arc::new(EvidenceAnalyzer::new());
        let locator = SpanLocator::with_analyzer(config.locator.clone(), analyzer.clone());
        EvidencePipeline {
            dispatcher: QueryDispatcher::new(generator, config.dispatch.retry.clone()),
            highlighter: Highlighter::with_locator(locator),
            analyzer,
            config: config.dispatch.clone(),
        }
    }

    pub fn dispatcher(&self) -> &QueryDispatcher<G> {
        &self.dispatcher
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Ask `question`, then highlight the answer (and any ground-truth
    /// vocabulary it missed) in every supporting document.
    pub fn answer(&self, question: &str, ground_truth: Option<&str>) -> Result<PipelineOutput> {
        let query = build_query(question, &self.config.prompt_trailer);
        info!("query: {query}");

        let outcome = self
            .dispatcher
            .dispatch(&query, self.config.initial_context_size)?;
        let raw_answer = outcome.response.answer;
        let answer = extract_answer(&raw_answer);
        debug!("answer after {} attempt(s): {answer}", outcome.attempts);

        let answer_tokens = TokenSet::from_text(self.analyzer.as_ref(), &answer)?;
        let missing = missing_tokens(self.analyzer.as_ref(), &answer_tokens, ground_truth)?;
        debug!(
            "{} answer tokens, {} missing ground-truth tokens, {} documents",
            answer_tokens.len(),
            missing.len(),
            outcome.response.documents.len()
        );

        let documents =
            self.highlight_documents(&outcome.response.documents, &answer_tokens, &missing)?;

        Ok(PipelineOutput {
            query,
            raw_answer,
            answer,
            ground_truth: ground_truth.map(str::to_string),
            answer_tokens,
            missing_tokens: missing,
            attempts: outcome.attempts,
            context_size: outcome.context_size,
            documents,
        })
    }

    /// Highlight each document independently; output keeps document order.
    pub fn highlight_documents(
        &self,
        documents: &[Document],
        answer: &TokenSet,
        missing: &TokenSet,
    ) -> Result<Vec<DocumentHighlight>> {
        documents
            .par_iter()
            .map(|document| -> Result<DocumentHighlight> {
                let result = self.highlighter.highlight(&document.text, answer, missing)?;
                Ok(DocumentHighlight {
                    document_id: document.id.clone(),
                    result,
                })
            })
            .collect()
    }
}
