//! `QueryDispatcher` — one request per accepted question, every failure
//! absorbed.
//!
//! The dispatcher is the error boundary of the pipeline: whatever the
//! service call does — succeed, reject the credential, time out, refuse the
//! connection — the outcome is a typed [`AnswerResult`] and the pipeline
//! stays ready for the next fragment.  No error value ever reaches the
//! session orchestrator.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::dispatch::service::{AnswerService, ServiceError};
use crate::gate::Question;
use crate::transcript::epoch_ms;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bearer token sent when no credential is present.  Keeps the request
/// shape identical for anonymous and signed-in users; the service answers
/// with 401 when it wants a real credential.
pub const PLACEHOLDER_TOKEN: &str = "guest";

/// Maximum number of question characters echoed back in fallback messages.
const ECHO_LIMIT: usize = 60;

// ---------------------------------------------------------------------------
// AnswerKind / AnswerResult
// ---------------------------------------------------------------------------

/// The three mutually exclusive outcomes a dispatch can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    /// The service answered the question.
    Success,
    /// The service rejected the credential (HTTP 401).
    AuthRequired,
    /// Transport failure, timeout, or any unexpected status.
    ConnectionFailure,
}

/// The rendered outcome of one dispatched question.
///
/// Immutable; ownership transfers to the answer buffer on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    /// Which fallback tier this dispatch resolved to.
    pub kind: AnswerKind,
    /// Display text: the answer on success, a fixed fallback message
    /// otherwise.
    pub body: String,
    /// The question as dispatched, untruncated.
    pub question_text: String,
    /// Epoch milliseconds when the result was produced.
    pub rendered_at_ms: u64,
}

// ---------------------------------------------------------------------------
// DispatchStatus
// ---------------------------------------------------------------------------

/// Phase events emitted around each dispatch: exactly one `Generating`
/// before the call and exactly one terminal status after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// The request is on the wire.
    Generating,
    /// The answer arrived.
    Ready,
    /// The credential was rejected; the user should register.
    AuthRequired,
    /// The service could not be reached.
    ConnectionFailed,
}

impl DispatchStatus {
    /// Stable label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            DispatchStatus::Generating => "generating",
            DispatchStatus::Ready => "ready",
            DispatchStatus::AuthRequired => "auth-required",
            DispatchStatus::ConnectionFailed => "connection-failed",
        }
    }
}

// ---------------------------------------------------------------------------
// QueryDispatcher
// ---------------------------------------------------------------------------

/// Dispatches accepted questions to an [`AnswerService`] and classifies the
/// outcome.
///
/// Cheap to clone; spawned dispatch tasks each take their own clone.
#[derive(Clone)]
pub struct QueryDispatcher {
    service: Arc<dyn AnswerService>,
    status_tx: mpsc::Sender<DispatchStatus>,
}

impl QueryDispatcher {
    /// Create a dispatcher over `service`, reporting phase changes on
    /// `status_tx`.
    pub fn new(service: Arc<dyn AnswerService>, status_tx: mpsc::Sender<DispatchStatus>) -> Self {
        Self { service, status_tx }
    }

    /// Dispatch one question with the given credential token (placeholder
    /// when absent) and classify the outcome.
    ///
    /// Evaluates each tier exactly once — no retries.  Never returns an
    /// error.
    pub async fn dispatch(&self, question: Question, token: Option<String>) -> AnswerResult {
        let _ = self.status_tx.send(DispatchStatus::Generating).await;

        let bearer = token.unwrap_or_else(|| PLACEHOLDER_TOKEN.to_string());
        let outcome = self.service.ask(&question.text, &bearer).await;

        let (kind, body, status) = match outcome {
            Ok(answer) => (AnswerKind::Success, answer, DispatchStatus::Ready),
            Err(ServiceError::Unauthorized) => (
                AnswerKind::AuthRequired,
                format!(
                    "Create an account to see answers. Question was: {}",
                    echo(&question.text)
                ),
                DispatchStatus::AuthRequired,
            ),
            Err(e) => {
                log::warn!("dispatch failed for {:?}: {e}", question.text);
                (
                    AnswerKind::ConnectionFailure,
                    format!(
                        "Answer service is unreachable. Question was: {}",
                        echo(&question.text)
                    ),
                    DispatchStatus::ConnectionFailed,
                )
            }
        };

        let _ = self.status_tx.send(status).await;

        AnswerResult {
            kind,
            body,
            question_text: question.text,
            rendered_at_ms: epoch_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

/// Echo a question into a fallback message, truncated to [`ECHO_LIMIT`]
/// characters with a `...` marker.  Truncates on char boundaries.
fn echo(question: &str) -> String {
    if question.chars().count() <= ECHO_LIMIT {
        return question.to_string();
    }
    let head: String = question.chars().take(ECHO_LIMIT).collect();
    format!("{head}...")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
