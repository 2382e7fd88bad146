//! Dedicated-thread stdin reader feeding the session event channel.
//!
//! Reading stdin is blocking, so it must live on its own OS thread — it
//! cannot run inside a tokio task.  [`StdinSource::start`] spawns that
//! thread and returns a handle; dropping the handle sets a stop flag so
//! further lines are silently discarded.  The thread itself stays blocked
//! in `read_line` until the process exits or stdin closes, which is safe —
//! it holds no resources that need explicit cleanup.

use std::io::BufRead;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::mpsc;

use crate::session::SessionEvent;
use crate::transcript::{epoch_ms, TranscriptFragment};

// ---------------------------------------------------------------------------
// StdinSource
// ---------------------------------------------------------------------------

/// Handle to a running stdin reader thread.
///
/// Construct one with [`StdinSource::start`].  Drop it to stop forwarding
/// fragments.
pub struct StdinSource {
    /// Shared stop flag — set `true` on [`Drop`].
    stop: Arc<AtomicBool>,
    /// Kept so the thread is not detached prematurely; never joined
    /// because `read_line` may block until process exit.
    _thread: std::thread::JoinHandle<()>,
}

impl StdinSource {
    /// Spawn a dedicated OS thread that reads stdin line by line and
    /// forwards each non-empty line as a timestamped transcript fragment
    /// on `tx`.
    ///
    /// The background thread uses `blocking_send` so it works correctly
    /// from a non-async context.  When stdin reaches EOF the thread exits
    /// quietly.
    pub fn start(tx: mpsc::Sender<SessionEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("stdin-transcript".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                let mut lines = stdin.lock().lines();

                while let Some(Ok(line)) = lines.next() {
                    if stop_flag.load(Ordering::Relaxed) {
                        break;
                    }

                    let text = line.trim();
                    if text.is_empty() {
                        continue;
                    }

                    let fragment = TranscriptFragment::new(text, epoch_ms());
                    if tx.blocking_send(SessionEvent::Transcript(fragment)).is_err() {
                        // Session gone; nothing left to feed.
                        break;
                    }
                }

                log::debug!("stdin source: input closed, reader thread exiting");
            })
            .expect("failed to spawn stdin-transcript thread");

        Self {
            stop,
            _thread: thread,
        }
    }
}

impl Drop for StdinSource {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// The handle must remain usable across threads (held by main while
    /// the runtime runs elsewhere).
    #[test]
    fn source_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<StdinSource>();
    }

    #[test]
    fn drop_sets_stop_flag() {
        let (tx, _rx) = mpsc::channel(4);
        let source = StdinSource::start(tx);
        let stop = Arc::clone(&source.stop);

        assert!(!stop.load(Ordering::Relaxed));
        drop(source);
        assert!(stop.load(Ordering::Relaxed));
    }
}
