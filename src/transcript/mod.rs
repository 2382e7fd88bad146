//! Transcript ingestion types and question classification.
//!
//! A [`TranscriptFragment`] is one unit of recognised speech from the
//! external speech-to-text engine.  Fragments arrive continuously while a
//! session is listening, and interim results may repeat or extend earlier
//! text — duplicate suppression is the debounce gate's job
//! ([`crate::gate::DebounceGate`]), not the source's.
//!
//! [`is_question`] is the cheap keyword heuristic that decides whether a
//! fragment is worth relaying at all.

pub mod classify;

pub use classify::is_question;

// ---------------------------------------------------------------------------
// TranscriptFragment
// ---------------------------------------------------------------------------

/// One unit of transcribed speech with the producer's timestamp.
///
/// Immutable once emitted; not retained beyond classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFragment {
    /// Recognised text, possibly overlapping a previous fragment.
    pub text: String,
    /// Milliseconds since the Unix epoch, as stamped by the producer.
    pub timestamp_ms: u64,
}

impl TranscriptFragment {
    /// Convenience constructor used by transcript sources and tests.
    pub fn new(text: impl Into<String>, timestamp_ms: u64) -> Self {
        Self {
            text: text.into(),
            timestamp_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// epoch_ms
// ---------------------------------------------------------------------------

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Used to stamp fragments at the source and results at dispatch; the
/// debounce gate takes explicit `now_ms` arguments instead so tests can
/// drive it with a synthetic clock.
pub fn epoch_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
