//! Query dispatch — authenticated requests to the remote answer service.
//!
//! This module provides:
//! * [`AnswerService`] — async trait implemented by all service backends.
//! * [`ApiAnswerService`] — reqwest client for the `/api/ask` endpoint.
//! * [`QueryDispatcher`] — turns an accepted question into exactly one
//!   request and absorbs every failure into a typed [`AnswerResult`].
//! * [`ServiceError`] — error variants for service calls.
//! * [`DispatchStatus`] — phase events emitted around each dispatch.
//!
//! # Fallback tiers
//!
//! Each dispatched question resolves to exactly one of three outcomes, and
//! no error value ever escapes the dispatcher:
//!
//! ```text
//! 2xx { "response": … }  → AnswerKind::Success
//! 401                    → AnswerKind::AuthRequired   (register prompt)
//! anything else          → AnswerKind::ConnectionFailure
//! ```
//!
//! No automatic retries — the only retry mechanism is the user asking
//! again, gated by [`crate::gate::DebounceGate`].

pub mod dispatcher;
pub mod service;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use dispatcher::{AnswerKind, AnswerResult, DispatchStatus, QueryDispatcher};
pub use service::{AnswerService, ApiAnswerService, ServiceError};
