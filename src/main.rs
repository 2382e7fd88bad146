//! Application entry point — askrelay.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create the tokio runtime.
//! 4. Build the answer service client and credential store.
//! 5. Create session channels (`event`, `update`).
//! 6. Spawn the session orchestrator.
//! 7. Probe `/api/health` once for the connectivity status line.
//! 8. Start the stdin transcript source and begin listening.
//! 9. Drive the render loop — prints status changes and the newest-first
//!    answer history until stdin closes.

use std::sync::Arc;

use tokio::sync::mpsc;

use askrelay::{
    auth::FileCredentialStore,
    config::AppConfig,
    dispatch::{AnswerKind, AnswerService, ApiAnswerService},
    session::{SessionEvent, SessionOrchestrator, SessionUpdate},
    source::StdinSource,
};

// ---------------------------------------------------------------------------
// Render loop
// ---------------------------------------------------------------------------

/// Print session updates to the terminal until the update channel closes.
///
/// Status changes print as single lines; each display update repaints the
/// history block, newest first.
async fn render_updates(mut update_rx: mpsc::Receiver<SessionUpdate>) {
    while let Some(update) = update_rx.recv().await {
        match update {
            SessionUpdate::Status(status) => {
                println!("[{}]", status.label());
            }
            SessionUpdate::Display(snapshot) => {
                println!("--- answers ({} shown, newest first) ---", snapshot.len());
                for result in &snapshot {
                    let marker = match result.kind {
                        AnswerKind::Success => "A",
                        AnswerKind::AuthRequired => "!",
                        AnswerKind::ConnectionFailure => "x",
                    };
                    println!("[{marker}] {} -> {}", result.question_text, result.body);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("askrelay starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Answer service + credential store
    let service: Arc<dyn AnswerService> = Arc::new(ApiAnswerService::from_config(&config.service));
    let credentials = Arc::new(FileCredentialStore::new());

    // 5. Channel setup
    let (event_tx, event_rx) = mpsc::channel::<SessionEvent>(64);
    let (update_tx, update_rx) = mpsc::channel::<SessionUpdate>(64);

    // 6. Session orchestrator
    let orchestrator =
        SessionOrchestrator::new(&config, Arc::clone(&service), credentials, update_tx);
    rt.spawn(orchestrator.run(event_rx));

    // 7. One-shot connectivity probe (display only)
    {
        let service = Arc::clone(&service);
        rt.spawn(async move {
            if service.health().await {
                log::info!("answer service reachable");
            } else {
                log::warn!("answer service unreachable; questions will fall back");
            }
        });
    }

    // 8. Transcript source + start listening
    rt.block_on(async {
        event_tx
            .send(SessionEvent::Start)
            .await
            .map_err(|_| anyhow::anyhow!("session closed before start"))
    })?;

    let _source = StdinSource::start(event_tx);
    println!("Listening. Type transcript lines; questions are relayed. Ctrl-D to quit.");

    // 9. Render loop — returns when the session shuts down after stdin EOF.
    rt.block_on(render_updates(update_rx));

    log::info!("askrelay shut down");
    Ok(())
}
