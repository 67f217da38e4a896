//! Configuration for the evidence pipeline.
//!
//! Every section has defaults, so a config file only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "locator": { "ordered_token_limit": 12 },
//!   "highlight": { "answer_color": "#C1F0C1" },
//!   "dispatch": { "initial_context_size": 3, "retry": { "max_attempts": 5 } }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatch::RetryPolicy;
use crate::error::{EvidentiaError, Result};
use crate::highlight::HighlightConfig;
use crate::locate::LocatorConfig;

/// Settings for answer generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Retrieved documents passed as context on the first attempt.
    pub initial_context_size: usize,
    /// Appended to every question before it is sent.
    pub prompt_trailer: String,
    /// Retry bounds.
    pub retry: RetryPolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            initial_context_size: 4,
            prompt_trailer: "Answer in short.".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidentiaConfig {
    pub locator: LocatorConfig,
    pub highlight: HighlightConfig,
    pub dispatch: DispatchConfig,
}

impl EvidentiaConfig {
    /// Load and validate a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: EvidentiaConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.locator.ordered_token_limit == 0 {
            return Err(EvidentiaError::config(
                "locator.ordered_token_limit must be at least 1",
            ));
        }
        if self.dispatch.retry.max_attempts == 0 {
            return Err(EvidentiaError::config(
                "dispatch.retry.max_attempts must be at least 1",
            ));
        }
        if self.dispatch.initial_context_size == 0 {
            return Err(EvidentiaError::config(
                "dispatch.initial_context_size must be at least 1",
            ));
        }
        Ok(())
    }
}
