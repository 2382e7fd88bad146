//! Session orchestration — wires transcript ingestion to dispatch and
//! display.
//!
//! # Architecture
//!
//! ```text
//! SessionEvent (mpsc)
//!        │
//!        ▼
//! SessionOrchestrator::run()  ← async tokio task
//!        │
//!        ├─ Start / Stop          → toggle listening, reopen/close buffer
//!        ├─ CredentialChanged     → refresh token view
//!        └─ Transcript(fragment)
//!              │
//!              ├─ DebounceGate::try_accept (classification + cooldown)
//!              └─ accepted → tokio::spawn(QueryDispatcher::dispatch)
//!                    │            (completion returns on an internal
//!                    │             channel; ingestion never blocks)
//!                    └─▶ AnswerBuffer::insert → SessionUpdate::Display
//!
//! SessionUpdate (mpsc) ──▶ host render loop
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use askrelay::auth::StaticCredentialStore;
//! use askrelay::config::AppConfig;
//! use askrelay::dispatch::ApiAnswerService;
//! use askrelay::session::{SessionEvent, SessionOrchestrator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let service = Arc::new(ApiAnswerService::from_config(&config.service));
//!     let credentials = Arc::new(StaticCredentialStore::new(None));
//!
//!     let (event_tx, event_rx) = mpsc::channel(64);
//!     let (update_tx, mut update_rx) = mpsc::channel(64);
//!
//!     let orchestrator = SessionOrchestrator::new(&config, service, credentials, update_tx);
//!     tokio::spawn(orchestrator.run(event_rx));
//!
//!     event_tx.send(SessionEvent::Start).await.unwrap();
//!     // feed SessionEvent::Transcript(…) from your transcript source,
//!     // render SessionUpdate values from update_rx.
//! }
//! ```

pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{SessionEvent, SessionOrchestrator, SessionUpdate};
