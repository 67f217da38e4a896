//! A file-backed answer generator.
//!
//! [`ReplayGenerator`] serves a recorded response instead of calling a model,
//! which makes the whole pipeline runnable offline. The response file can also
//! script failures for the first attempts to exercise the retry policy.
//!
//! ```json
//! {
//!   "answer": "Helpful Answer: The fee is 0.5%.",
//!   "documents": [{ "id": "prospectus.pdf#4", "text": "..." }],
//!   "failures": ["ThrottlingException"]
//! }
//! ```

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::dispatch::{AnswerGenerator, FailureKind, GeneratedAnswer, GenerationError};
use crate::document::Document;
use crate::error::Result;

/// Recorded response as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayResponse {
    pub answer: String,
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Failure names returned, in order, before the answer is served.
    #[serde(default)]
    pub failures: Vec<String>,
}

/// Serves a recorded answer, trimming documents to the requested context size.
#[derive(Debug)]
pub struct ReplayGenerator {
    answer: String,
    documents: Vec<Document>,
    failures: Mutex<VecDeque<FailureKind>>,
}

impl ReplayGenerator {
    pub fn new<S: Into<String>>(answer: S, documents: Vec<Document>) -> Self {
        ReplayGenerator {
            answer: answer.into(),
            documents,
            failures: Mutex::new(VecDeque::new()),
        }
    }

    pub fn from_response(response: ReplayResponse) -> Self {
        let failures = response
            .failures
            .iter()
            .map(|name| FailureKind::from_name(name))
            .collect();
        ReplayGenerator {
            answer: response.answer,
            documents: response.documents,
            failures: Mutex::new(failures),
        }
    }

    /// Load a response file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let response: ReplayResponse = serde_json::from_str(&content)?;
        debug!(
            "loaded replay response from {} ({} documents, {} scripted failures)",
            path.as_ref().display(),
            response.documents.len(),
            response.failures.len()
        );
        Ok(Self::from_response(response))
    }

    /// Fail with these kinds, in order, before answering.
    pub fn with_failures(self, failures: Vec<FailureKind>) -> Self {
        *self.failures.lock() = failures.into();
        self
    }

    /// Failures still queued.
    pub fn pending_failures(&self) -> usize {
        self.failures.lock().len()
    }
}

impl AnswerGenerator for ReplayGenerator {
    fn generate(
        &self,
        _query: &str,
        context_size: usize,
    ) -> std::result::Result<GeneratedAnswer, GenerationError> {
        if let Some(kind) = self.failures.lock().pop_front() {
            return Err(GenerationError::new(kind, "scripted failure"));
        }

        Ok(GeneratedAnswer {
            answer: self.answer.clone(),
            documents: self.documents.iter().take(context_size).cloned().collect(),
        })
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}
