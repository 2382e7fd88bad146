//! Debounce gate — at most one accepted question per cooldown window.
//!
//! The speech recogniser re-emits overlapping interim results for a single
//! utterance, so the same question can arrive several times within a couple
//! of seconds.  [`DebounceGate`] guards the dispatch path: the first
//! qualifying fragment is accepted and the gate enters **Cooling**, during
//! which every fragment is rejected.  The gate returns to **Idle** once
//! `cooldown_ms` has elapsed from the acceptance — deliberately decoupled
//! from dispatch completion, so a slow network response can never block the
//! next question and a fast one can never let the same utterance fire
//! twice.
//!
//! # State machine
//!
//! ```text
//! Idle ──qualifying fragment──▶ Cooling
//! Cooling ──cooldown_ms elapsed──▶ Idle
//! ```
//!
//! The gate is driven entirely by the caller's clock (`now_ms` arguments):
//! no timers, no background tasks.  The `busy` sub-flag is an inner safety
//! net that clears after `busy_reset_ms` (< `cooldown_ms`), bounding how
//! long a stuck in-flight marker could ever be observed.

use crate::transcript::{is_question, TranscriptFragment};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Rejection window after an acceptance, in milliseconds.
pub const DEFAULT_COOLDOWN_MS: u64 = 3_000;

/// Self-clear interval for the in-flight `busy` marker, in milliseconds.
pub const DEFAULT_BUSY_RESET_MS: u64 = 2_000;

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

/// A transcript fragment the gate has accepted for dispatch.
///
/// Created exactly once per acceptance; consumed exactly once by the query
/// dispatcher; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// The accepted fragment text.
    pub text: String,
    /// Gate clock reading at the moment of acceptance.
    pub accepted_at_ms: u64,
}

// ---------------------------------------------------------------------------
// GateState
// ---------------------------------------------------------------------------

/// Observable state of the gate at a given clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Ready to accept the next qualifying fragment.
    Idle,
    /// Inside the cooldown window; every fragment is rejected.
    Cooling,
}

impl GateState {
    /// A short label for log lines and status display.
    pub fn label(&self) -> &'static str {
        match self {
            GateState::Idle => "idle",
            GateState::Cooling => "cooling",
        }
    }
}

// ---------------------------------------------------------------------------
// DebounceGate
// ---------------------------------------------------------------------------

/// Stateful gate enforcing at most one accepted question per cooldown
/// window.
///
/// ```
/// use askrelay::gate::{DebounceGate, GateState};
/// use askrelay::transcript::TranscriptFragment;
///
/// let mut gate = DebounceGate::new(3_000, 2_000);
/// let frag = TranscriptFragment::new("what is Rust?", 1_000);
///
/// let q = gate.try_accept(&frag, 1_000).unwrap();
/// assert_eq!(q.text, "what is Rust?");
/// assert_eq!(gate.state(1_500), GateState::Cooling);
///
/// // Re-emitted interim result within the window is rejected.
/// assert!(gate.try_accept(&frag, 2_200).is_none());
///
/// // Window elapsed — ready again.
/// assert_eq!(gate.state(4_000), GateState::Idle);
/// ```
#[derive(Debug)]
pub struct DebounceGate {
    cooldown_ms: u64,
    busy_reset_ms: u64,
    /// Clock reading of the most recent acceptance, `None` before the first.
    last_accepted_ms: Option<u64>,
}

impl DebounceGate {
    /// Create a gate with explicit windows (milliseconds).
    ///
    /// `busy_reset_ms` is clamped to `cooldown_ms`; the net rejection window
    /// is always bounded by the longer of the two.
    pub fn new(cooldown_ms: u64, busy_reset_ms: u64) -> Self {
        Self {
            cooldown_ms,
            busy_reset_ms: busy_reset_ms.min(cooldown_ms),
            last_accepted_ms: None,
        }
    }

    /// Gate with the default 3 s cooldown and 2 s busy reset.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_COOLDOWN_MS, DEFAULT_BUSY_RESET_MS)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Observable state at clock reading `now_ms`.
    pub fn state(&self, now_ms: u64) -> GateState {
        match self.last_accepted_ms {
            Some(accepted) if now_ms.saturating_sub(accepted) < self.cooldown_ms => {
                GateState::Cooling
            }
            _ => GateState::Idle,
        }
    }

    /// Whether a dispatch is still marked in flight at `now_ms`.
    ///
    /// Clears on its own `busy_reset_ms` after acceptance, independent of
    /// whether the dispatched request has completed — a stuck in-flight
    /// marker can never be observed for longer than the reset interval.
    pub fn is_busy(&self, now_ms: u64) -> bool {
        match self.last_accepted_ms {
            Some(accepted) => now_ms.saturating_sub(accepted) < self.busy_reset_ms,
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Acceptance
    // -----------------------------------------------------------------------

    /// Offer a fragment to the gate at clock reading `now_ms`.
    ///
    /// Returns a [`Question`] only when the gate is [`GateState::Idle`] and
    /// [`is_question`] accepts the fragment's text.  Acceptance records the
    /// clock reading and enters Cooling in the same step, so no caller can
    /// ever observe an accepted question without the window armed.
    ///
    /// Rejection is silent — logged at debug level, not surfaced as an
    /// error.
    pub fn try_accept(&mut self, fragment: &TranscriptFragment, now_ms: u64) -> Option<Question> {
        if !is_question(&fragment.text) {
            return None;
        }

        if self.state(now_ms) == GateState::Cooling {
            log::debug!(
                "gate: rejected {:?} ({} ms into cooldown)",
                fragment.text,
                now_ms.saturating_sub(self.last_accepted_ms.unwrap_or(0)),
            );
            return None;
        }

        self.last_accepted_ms = Some(now_ms);
        log::debug!("gate: accepted {:?} at {now_ms} ms", fragment.text);

        Some(Question {
            text: fragment.text.clone(),
            accepted_at_ms: now_ms,
        })
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, ts: u64) -> TranscriptFragment {
        TranscriptFragment::new(text, ts)
    }

    // ---- classification gating ---

    #[test]
    fn non_question_is_never_accepted() {
        let mut gate = DebounceGate::with_defaults();
        assert!(gate.try_accept(&frag("just a statement", 0), 0).is_none());
        // State must not have moved.
        assert_eq!(gate.state(0), GateState::Idle);
    }

    #[test]
    fn non_question_during_cooldown_leaves_window_untouched() {
        let mut gate = DebounceGate::new(3_000, 2_000);
        gate.try_accept(&frag("what is this?", 0), 0).unwrap();
        assert!(gate.try_accept(&frag("a statement", 1_000), 1_000).is_none());
        // Window still expires at the original deadline.
        assert_eq!(gate.state(2_999), GateState::Cooling);
        assert_eq!(gate.state(3_000), GateState::Idle);
    }

    // ---- acceptance & cooldown ---

    #[test]
    fn first_question_is_accepted_with_timestamp() {
        let mut gate = DebounceGate::with_defaults();
        let q = gate.try_accept(&frag("how does this work", 42), 42).unwrap();
        assert_eq!(q.text, "how does this work");
        assert_eq!(q.accepted_at_ms, 42);
    }

    #[test]
    fn acceptance_enters_cooling_atomically() {
        let mut gate = DebounceGate::with_defaults();
        gate.try_accept(&frag("why?", 10), 10).unwrap();
        assert_eq!(gate.state(10), GateState::Cooling);
    }

    #[test]
    fn duplicates_within_cooldown_are_rejected() {
        let mut gate = DebounceGate::new(3_000, 2_000);
        gate.try_accept(&frag("what is a mutex?", 0), 0).unwrap();

        // Overlapping interim results for the same utterance.
        for now in [100, 500, 1_500, 2_999] {
            assert!(
                gate.try_accept(&frag("what is a mutex?", now), now).is_none(),
                "duplicate at {now} ms should be rejected"
            );
        }
    }

    #[test]
    fn gate_reopens_after_cooldown() {
        let mut gate = DebounceGate::new(3_000, 2_000);
        gate.try_accept(&frag("what is a mutex?", 0), 0).unwrap();

        let q = gate.try_accept(&frag("how about channels?", 3_000), 3_000);
        assert!(q.is_some());
    }

    #[test]
    fn at_most_one_acceptance_per_window_over_a_long_run() {
        let mut gate = DebounceGate::new(3_000, 2_000);
        let mut accepted = 0u32;

        // Qualifying fragments every 250 ms for 12 s → 4 full windows.
        for now in (0..12_000).step_by(250) {
            if gate.try_accept(&frag("explain ownership", now), now).is_some() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 4);
    }

    // ---- busy safety net ---

    #[test]
    fn busy_clears_before_cooldown() {
        let mut gate = DebounceGate::new(3_000, 2_000);
        gate.try_accept(&frag("what now?", 0), 0).unwrap();

        assert!(gate.is_busy(1_999));
        assert!(!gate.is_busy(2_000));
        // Still cooling even though busy has cleared.
        assert_eq!(gate.state(2_000), GateState::Cooling);
    }

    #[test]
    fn busy_reset_is_clamped_to_cooldown() {
        let gate = DebounceGate::new(1_000, 5_000);
        assert_eq!(gate.busy_reset_ms, 1_000);
    }

    #[test]
    fn fresh_gate_is_idle_and_not_busy() {
        let gate = DebounceGate::with_defaults();
        assert_eq!(gate.state(0), GateState::Idle);
        assert!(!gate.is_busy(0));
    }

    // ---- labels ---

    #[test]
    fn state_labels() {
        assert_eq!(GateState::Idle.label(), "idle");
        assert_eq!(GateState::Cooling.label(), "cooling");
    }
}
