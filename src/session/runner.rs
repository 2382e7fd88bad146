//! Session orchestrator — drives the transcript → gate → dispatch →
//! display loop.
//!
//! [`SessionOrchestrator`] owns the gate, the answer buffer, and a
//! read-only credential view, and responds to [`SessionEvent`]s received
//! over a `tokio::sync::mpsc` channel.  Accepted questions are dispatched
//! on spawned tasks so the ingestion loop never waits on the network; each
//! completion comes back over an internal channel and lands in the buffer
//! in the same event stream that fragments arrive on.
//!
//! Because the gate admits at most one question per cooldown window, at
//! most one dispatch is ever in flight.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::auth::CredentialStore;
use crate::config::AppConfig;
use crate::dispatch::{AnswerResult, AnswerService, DispatchStatus, QueryDispatcher};
use crate::gate::DebounceGate;
use crate::history::AnswerBuffer;
use crate::transcript::{epoch_ms, TranscriptFragment};

// ---------------------------------------------------------------------------
// SessionEvent / SessionUpdate
// ---------------------------------------------------------------------------

/// Inbound events consumed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Begin listening.  No-op when already listening.
    Start,
    /// Stop listening and close the display buffer.  No-op when not
    /// listening.
    Stop,
    /// One unit of recognised speech from the transcript source.
    Transcript(TranscriptFragment),
    /// The external credential store changed; refresh the token view.
    CredentialChanged,
}

/// Outbound updates for the host's render loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// A dispatch phase change (`generating`, `ready`, `auth-required`,
    /// `connection-failed`).
    Status(DispatchStatus),
    /// Fresh answer-history snapshot, newest first.  Sent whenever the
    /// buffer changes.
    Display(Vec<AnswerResult>),
}

// ---------------------------------------------------------------------------
// SessionOrchestrator
// ---------------------------------------------------------------------------

/// Owns one continuous listening session.
///
/// Create with [`SessionOrchestrator::new`], then call
/// [`run`](Self::run) inside a tokio task.
pub struct SessionOrchestrator {
    gate: DebounceGate,
    buffer: AnswerBuffer,
    service: Arc<dyn AnswerService>,
    credentials: Arc<dyn CredentialStore>,
    update_tx: mpsc::Sender<SessionUpdate>,
    /// Cached token view, refreshed on `Start` and `CredentialChanged`.
    token: Option<String>,
    listening: bool,
    in_flight: usize,
}

impl SessionOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `config`      — gate timing and display capacity.
    /// * `service`     — the answer service backend.
    /// * `credentials` — read-only credential view; never written here.
    /// * `update_tx`   — channel the host renders from.
    pub fn new(
        config: &AppConfig,
        service: Arc<dyn AnswerService>,
        credentials: Arc<dyn CredentialStore>,
        update_tx: mpsc::Sender<SessionUpdate>,
    ) -> Self {
        Self {
            gate: DebounceGate::new(config.gate.cooldown_ms, config.gate.busy_reset_ms),
            buffer: AnswerBuffer::new(config.display.history_capacity),
            service,
            credentials,
            update_tx,
            token: None,
            listening: false,
            in_flight: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until `event_rx` is closed and every in-flight
    /// dispatch has completed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`.
    pub async fn run(mut self, mut event_rx: mpsc::Receiver<SessionEvent>) {
        let (status_tx, mut status_rx) = mpsc::channel::<DispatchStatus>(16);
        let (done_tx, mut done_rx) = mpsc::channel::<AnswerResult>(4);
        let dispatcher = QueryDispatcher::new(Arc::clone(&self.service), status_tx);

        let mut events_open = true;

        loop {
            tokio::select! {
                event = event_rx.recv(), if events_open => match event {
                    Some(SessionEvent::Start) => self.handle_start(),
                    Some(SessionEvent::Stop) => self.handle_stop(),
                    Some(SessionEvent::Transcript(fragment)) => {
                        self.handle_transcript(fragment, &dispatcher, &done_tx);
                    }
                    Some(SessionEvent::CredentialChanged) => {
                        self.token = self.credentials.token();
                        log::info!(
                            "session: credential changed (present: {})",
                            self.token.is_some()
                        );
                    }
                    None => events_open = false,
                },

                Some(status) = status_rx.recv() => {
                    let _ = self.update_tx.send(SessionUpdate::Status(status)).await;
                }

                Some(result) = done_rx.recv() => {
                    self.handle_completion(result).await;
                }
            }

            if !events_open && self.in_flight == 0 {
                break;
            }
        }

        // Forward any statuses still queued from the final dispatch.
        while let Ok(status) = status_rx.try_recv() {
            let _ = self.update_tx.send(SessionUpdate::Status(status)).await;
        }

        log::info!("session: event channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    /// Begin listening.  Idempotent — a second `Start` changes nothing.
    fn handle_start(&mut self) {
        if self.listening {
            log::debug!("session: Start while already listening (no-op)");
            return;
        }

        self.listening = true;
        self.buffer.reopen();
        self.token = self.credentials.token();
        log::info!("session: listening");
    }

    /// Stop listening and close the buffer.  Idempotent.
    ///
    /// A dispatch still in flight runs to completion; its insert no-ops
    /// against the closed buffer.
    fn handle_stop(&mut self) {
        if !self.listening {
            log::debug!("session: Stop while not listening (no-op)");
            return;
        }

        self.listening = false;
        self.buffer.close();
        log::info!("session: stopped");
    }

    /// Gate-check one fragment; on acceptance, fire off the dispatch.
    ///
    /// The spawned task reports back on `done_tx` — the ingestion loop
    /// never awaits the network.
    fn handle_transcript(
        &mut self,
        fragment: TranscriptFragment,
        dispatcher: &QueryDispatcher,
        done_tx: &mpsc::Sender<AnswerResult>,
    ) {
        if !self.listening {
            log::debug!("session: fragment while not listening, dropped");
            return;
        }

        // Gate time comes from our own clock, not the producer's stamp, so
        // a skewed source cannot hold the gate open or shut.
        let Some(question) = self.gate.try_accept(&fragment, epoch_ms()) else {
            return;
        };

        let token = self.token.clone();
        let dispatcher = dispatcher.clone();
        let done_tx = done_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = dispatcher.dispatch(question, token).await;
            let _ = done_tx.send(result).await;
        });
    }

    /// Insert a completed dispatch and publish the new snapshot.
    async fn handle_completion(&mut self, result: AnswerResult) {
        self.in_flight = self.in_flight.saturating_sub(1);

        // No-op against a closed buffer when the session stopped mid-dispatch.
        self.buffer.insert(result);

        if self.listening {
            let _ = self
                .update_tx
                .send(SessionUpdate::Display(self.buffer.snapshot()))
                .await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
