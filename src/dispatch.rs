//! Answer generation with a bounded retry policy.
//!
//! The [`QueryDispatcher`] calls an [`AnswerGenerator`] up to
//! [`RetryPolicy::max_attempts`] times. What happens after a failure depends
//! on its [`FailureKind`]:
//!
//! - `ValidationException` while the context size `K` is above 1: retry with
//!   `K - 1` retrieved documents.
//! - `ThrottlingException`: retry unchanged, after a backoff delay.
//! - anything else, including `ValidationException` at `K = 1`: give up and
//!   return the failure as reported.
//!
//! The retry loop is a small state machine over ([`RetryState`]) attempt
//! number × context size, advanced by [`RetryState::on_failure`].

pub mod replay;

use std::fmt;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;

/// Named kind of failure reported by an answer generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// The request was rejected as invalid, typically because the prompt with
    /// its retrieved context was too large.
    Validation,
    /// The service is rate limiting.
    Throttling,
    /// Any other named failure.
    Other(String),
}

impl FailureKind {
    /// Classify a failure by the name the generation service reports.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ValidationException" => FailureKind::Validation,
            "ThrottlingException" => FailureKind::Throttling,
            other => FailureKind::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FailureKind::Validation => "ValidationException",
            FailureKind::Throttling => "ThrottlingException",
            FailureKind::Other(name) => name,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed generation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct GenerationError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerationError {
    pub fn new<S: Into<String>>(kind: FailureKind, message: S) -> Self {
        GenerationError {
            kind,
            message: message.into(),
        }
    }
}

/// Answer text and the documents it was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAnswer {
    pub answer: String,
    pub documents: Vec<Document>,
}

/// The answer-generation service.
///
/// `context_size` is how many retrieved documents to pass as context.
pub trait AnswerGenerator: Send + Sync {
    fn generate(
        &self,
        query: &str,
        context_size: usize,
    ) -> std::result::Result<GeneratedAnswer, GenerationError>;

    fn name(&self) -> &'static str;
}

/// Bounds on the retry loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, the first call included.
    pub max_attempts: usize,
    /// Delay before the first retry after throttling; doubles per retry.
    pub throttle_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 4,
            throttle_backoff_ms: 250,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt budget.
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the base throttling backoff.
    pub fn throttle_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.throttle_backoff_ms = backoff_ms;
        self
    }

    /// Delay before attempt `next_attempt` (2-based) after throttling.
    pub fn backoff_before(&self, next_attempt: usize) -> Duration {
        let exponent = next_attempt.saturating_sub(2).min(16) as u32;
        Duration::from_millis(self.throttle_backoff_ms.saturating_mul(1 << exponent))
    }
}

/// Where the retry loop stands: attempt about to run (1-based) and the
/// context size it runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryState {
    pub attempt: usize,
    pub context_size: usize,
}

/// Outcome of feeding a failure to [`RetryState::on_failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Validation failure with room to shrink: retry with less context.
    ShrinkContext(RetryState),
    /// Throttled: retry with the same context.
    RetryUnchanged(RetryState),
    /// Not retryable; propagate the failure.
    Abort,
    /// Attempt budget spent; propagate the failure.
    Exhausted,
}

impl RetryState {
    /// State before the first attempt. A context size of 0 is raised to 1.
    pub fn initial(context_size: usize) -> Self {
        RetryState {
            attempt: 1,
            context_size: context_size.max(1),
        }
    }

    /// Decide what follows a failed attempt.
    pub fn on_failure(&self, kind: &FailureKind, policy: &RetryPolicy) -> Transition {
        let retryable = match kind {
            FailureKind::Validation => self.context_size > 1,
            FailureKind::Throttling => true,
            FailureKind::Other(_) => false,
        };
        if !retryable {
            return Transition::Abort;
        }
        if self.attempt >= policy.max_attempts {
            return Transition::Exhausted;
        }

        let attempt = self.attempt + 1;
        match kind {
            FailureKind::Validation => Transition::ShrinkContext(RetryState {
                attempt,
                context_size: self.context_size - 1,
            }),
            _ => Transition::RetryUnchanged(RetryState {
                attempt,
                context_size: self.context_size,
            }),
        }
    }
}

/// A successful dispatch and the state it succeeded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub response: GeneratedAnswer,
    /// Attempts used, the successful one included.
    pub attempts: usize,
    /// Context size of the successful attempt.
    pub context_size: usize,
}

/// Calls an [`AnswerGenerator`] under a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct QueryDispatcher<G> {
    generator: G,
    policy: RetryPolicy,
}

impl<G: AnswerGenerator> QueryDispatcher<G> {
    pub fn new(generator: G, policy: RetryPolicy) -> Self {
        QueryDispatcher { generator, policy }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `query` starting from `context_size` retrieved documents.
    ///
    /// On failure the error is exactly what the generator returned on the
    /// last attempt.
    pub fn dispatch(
        &self,
        query: &str,
        context_size: usize,
    ) -> std::result::Result<DispatchOutcome, GenerationError> {
        let mut state = RetryState::initial(context_size);

        loop {
            debug!(
                "{} attempt {}/{} with context size {}",
                self.generator.name(),
                state.attempt,
                self.policy.max_attempts,
                state.context_size
            );

            let error = match self.generator.generate(query, state.context_size) {
                Ok(response) => {
                    return Ok(DispatchOutcome {
                        response,
                        attempts: state.attempt,
                        context_size: state.context_size,
                    });
                }
                Err(error) => error,
            };

            warn!("attempt {} failed: {}", state.attempt, error);
            state = match state.on_failure(&error.kind, &self.policy) {
                Transition::ShrinkContext(next) => {
                    info!(
                        "retrying with shorter context ({} -> {})",
                        state.context_size, next.context_size
                    );
                    next
                }
                Transition::RetryUnchanged(next) => {
                    let delay = self.policy.backoff_before(next.attempt);
                    info!("retrying after throttling in {} ms", delay.as_millis());
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    next
                }
                Transition::Abort => return Err(error),
                Transition::Exhausted => {
                    warn!("giving up after {} attempts", state.attempt);
                    return Err(error);
                }
            };
        }
    }
}

/// Append the prompt trailer to a question and trim the result.
pub fn build_query(question: &str, trailer: &str) -> String {
    format!("{question} {trailer}").trim().to_string()
}
