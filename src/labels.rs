//! Ground-truth labels.
//!
//! Labels come in two JSON files:
//!
//! - the datapoint master, mapping a datapoint name to its question text:
//!   `{ "expense_ratio": "What is the net expense ratio?" }`
//! - the labels file, mapping a document path to its ground truth per
//!   datapoint: `{ "docs/fund_a.pdf": { "expense_ratio": "0.50%" } }`
//!
//! A ground truth is found by matching the question text against the master,
//! then looking the datapoint up for the document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ahash::AHashMap;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::error::{EvidentiaError, Result};

lazy_static! {
    static ref QUESTION_NUMBER: Regex =
        Regex::new(r"^[\d\.\s]+").expect("question number pattern is valid");
}

/// Strip a leading question number such as `"3. "` from a question.
pub fn clean_question(question: &str) -> String {
    QUESTION_NUMBER.replace(question, "").into_owned()
}

/// Datapoint questions and per-document ground truths.
#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    master: BTreeMap<String, String>,
    labels: AHashMap<String, BTreeMap<String, String>>,
}

impl LabelStore {
    pub fn new(
        master: BTreeMap<String, String>,
        labels: AHashMap<String, BTreeMap<String, String>>,
    ) -> Self {
        LabelStore { master, labels }
    }

    /// Load the datapoint master and, optionally, the labels file.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(master: P, labels: Option<Q>) -> Result<Self> {
        let master: BTreeMap<String, String> = read_json(master.as_ref())?;
        let labels: AHashMap<String, BTreeMap<String, String>> = match labels {
            Some(path) => read_json(path.as_ref())?,
            None => AHashMap::new(),
        };
        debug!(
            "loaded {} datapoints and labels for {} documents",
            master.len(),
            labels.len()
        );
        Ok(LabelStore { master, labels })
    }

    /// Questions numbered from 1, in datapoint-name order.
    pub fn questions(&self) -> Vec<String> {
        self.master
            .values()
            .enumerate()
            .map(|(i, question)| format!("{}. {}", i + 1, question))
            .collect()
    }

    /// Datapoint whose question equals `question` once numbering and
    /// surrounding whitespace are ignored.
    pub fn datapoint_for(&self, question: &str) -> Option<&str> {
        let wanted = clean_question(question);
        let wanted = wanted.trim();
        self.master
            .iter()
            .find(|(_, text)| text.trim() == wanted)
            .map(|(datapoint, _)| datapoint.as_str())
    }

    /// Ground truth for `question` on the document at `doc_path`.
    ///
    /// The document is matched by its full path first, then by file name.
    /// Several paths sharing that file name resolve to the smallest path.
    pub fn ground_truth(&self, doc_path: &str, question: &str) -> Option<&str> {
        let datapoint = self.datapoint_for(question)?;
        let labels = self.labels.get(doc_path).or_else(|| {
            let file_name = Path::new(doc_path).file_name()?;
            self.labels
                .iter()
                .filter(|(path, _)| Path::new(path.as_str()).file_name() == Some(file_name))
                .min_by_key(|(path, _)| path.as_str())
                .map(|(_, labels)| labels)
        })?;
        labels.get(datapoint).map(String::as_str)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        EvidentiaError::label(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&content)?)
}
