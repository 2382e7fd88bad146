//! Bounded, newest-first buffer of rendered answers.
//!
//! [`AnswerBuffer`] keeps the last few [`AnswerResult`]s for display.
//! Insertion always prepends; once the buffer exceeds its capacity the
//! oldest entries are evicted from the back.  Entries are immutable once
//! inserted — there is no update or delete beyond capacity eviction.
//!
//! The buffer also carries a closed flag so a dispatch that completes after
//! the session has stopped lands in a no-op instead of a panic or a stale
//! display update.

use std::collections::VecDeque;

use crate::dispatch::AnswerResult;

/// Default number of answers kept for display.
pub const DEFAULT_CAPACITY: usize = 6;

// ---------------------------------------------------------------------------
// AnswerBuffer
// ---------------------------------------------------------------------------

/// Capacity-bounded, newest-first store of dispatch results.
///
/// ```
/// use askrelay::dispatch::{AnswerKind, AnswerResult};
/// use askrelay::history::AnswerBuffer;
///
/// let mut buf = AnswerBuffer::new(2);
/// # let result = |body: &str| AnswerResult {
/// #     kind: AnswerKind::Success,
/// #     body: body.into(),
/// #     question_text: "q".into(),
/// #     rendered_at_ms: 0,
/// # };
/// buf.insert(result("first"));
/// buf.insert(result("second"));
/// buf.insert(result("third"));
///
/// let texts: Vec<_> = buf.snapshot().iter().map(|r| r.body.clone()).collect();
/// assert_eq!(texts, vec!["third", "second"]); // "first" evicted
/// ```
#[derive(Debug)]
pub struct AnswerBuffer {
    entries: VecDeque<AnswerResult>,
    capacity: usize,
    closed: bool,
}

impl AnswerBuffer {
    /// Create a buffer holding at most `capacity` results.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            closed: false,
        }
    }

    /// Buffer with the default display capacity.
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Prepend a result, evicting from the back past capacity.
    ///
    /// A no-op on a closed buffer (logged at debug level).
    pub fn insert(&mut self, result: AnswerResult) {
        if self.closed {
            log::debug!("answer buffer closed; dropping result for {:?}", result.question_text);
            return;
        }

        self.entries.push_front(result);

        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Stop accepting inserts.  Idempotent; existing entries stay readable.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Resume accepting inserts.  Idempotent.
    pub fn reopen(&mut self) {
        self.closed = false;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The current contents, newest first.
    pub fn snapshot(&self) -> Vec<AnswerResult> {
        self.entries.iter().cloned().collect()
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no results.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::AnswerKind;

    fn result(body: &str, ts: u64) -> AnswerResult {
        AnswerResult {
            kind: AnswerKind::Success,
            body: body.into(),
            question_text: format!("q-{body}"),
            rendered_at_ms: ts,
        }
    }

    fn bodies(buf: &AnswerBuffer) -> Vec<String> {
        buf.snapshot().iter().map(|r| r.body.clone()).collect()
    }

    #[test]
    fn insert_prepends() {
        let mut buf = AnswerBuffer::new(6);
        buf.insert(result("a", 1));
        buf.insert(result("b", 2));
        buf.insert(result("c", 3));

        assert_eq!(bodies(&buf), vec!["c", "b", "a"]);
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut buf = AnswerBuffer::new(6);
        for i in 0..20 {
            buf.insert(result(&format!("r{i}"), i));
            assert!(buf.len() <= 6);
        }
    }

    #[test]
    fn seventh_insert_evicts_the_oldest() {
        let mut buf = AnswerBuffer::with_default_capacity();
        for i in 0..7 {
            buf.insert(result(&format!("r{i}"), i));
        }

        let snapshot = bodies(&buf);
        assert_eq!(snapshot.len(), 6);
        assert!(!snapshot.contains(&"r0".to_string()));
        assert_eq!(snapshot.first().map(String::as_str), Some("r6"));
        assert_eq!(snapshot.last().map(String::as_str), Some("r1"));
    }

    #[test]
    fn snapshot_of_empty_buffer_is_empty() {
        let buf = AnswerBuffer::new(6);
        assert!(buf.is_empty());
        assert!(buf.snapshot().is_empty());
    }

    #[test]
    fn insert_after_close_is_a_noop() {
        let mut buf = AnswerBuffer::new(6);
        buf.insert(result("kept", 1));
        buf.close();
        buf.insert(result("dropped", 2));

        assert_eq!(bodies(&buf), vec!["kept"]);
    }

    #[test]
    fn reopen_resumes_inserts() {
        let mut buf = AnswerBuffer::new(6);
        buf.close();
        buf.insert(result("dropped", 1));
        buf.reopen();
        buf.insert(result("kept", 2));

        assert_eq!(bodies(&buf), vec!["kept"]);
    }

    #[test]
    fn close_is_idempotent_and_preserves_entries() {
        let mut buf = AnswerBuffer::new(6);
        buf.insert(result("a", 1));
        buf.close();
        buf.close();

        assert_eq!(bodies(&buf), vec!["a"]);
    }
}
