//! askrelay — question detection and query orchestration over a live
//! transcript stream.
//!
//! The pipeline ingests noisy speech-to-text fragments, decides which ones
//! are actual questions, and relays at most one question per cooldown
//! window to a remote answer service, keeping the last few answers in a
//! bounded newest-first history:
//!
//! ```text
//! transcript source → classifier → debounce gate → dispatcher → history
//! ```
//!
//! Every dispatch resolves to exactly one of three outcomes — answer,
//! register prompt (401), or backend-unreachable — so no failure in the
//! pipeline is ever fatal; the session stays ready for the next fragment.
//!
//! Module map:
//! * [`transcript`] — fragment type and the question heuristic.
//! * [`gate`]       — the one-question-per-window debounce gate.
//! * [`dispatch`]   — answer service client and fallback classification.
//! * [`history`]    — bounded newest-first answer buffer.
//! * [`session`]    — the orchestrator tying it all together.
//! * [`auth`]       — read-only credential view.
//! * [`source`]     — concrete transcript producers (stdin).
//! * [`config`]     — TOML settings and platform paths.

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod gate;
pub mod history;
pub mod session;
pub mod source;
pub mod transcript;
