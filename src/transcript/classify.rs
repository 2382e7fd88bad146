//! Keyword-based question detection.
//!
//! [`is_question`] scans a transcript fragment for a literal `?` or any of a
//! small fixed set of interrogative keywords.  This is a deliberately cheap
//! heuristic — no parsing, no semantics — tuned to err on the side of
//! relaying: the debounce gate and the remote service absorb the occasional
//! false positive.

// ---------------------------------------------------------------------------
// Keyword set
// ---------------------------------------------------------------------------

/// Interrogative markers matched case-insensitively anywhere in the text.
static QUESTION_KEYWORDS: &[&str] = &["what", "how", "why", "explain", "tell me"];

// ---------------------------------------------------------------------------
// is_question
// ---------------------------------------------------------------------------

/// Returns `true` when `text` looks like a question.
///
/// A fragment qualifies if it contains a literal `?`, or contains any of
/// the keywords in [`QUESTION_KEYWORDS`] (case-insensitive substring match).
/// Pure and infallible — never panics, never errs.
///
/// ```
/// use askrelay::transcript::is_question;
///
/// assert!(is_question("what time is it"));
/// assert!(is_question("Tell Me about yourself"));
/// assert!(is_question("you're sure?"));
/// assert!(!is_question("I finished the report"));
/// ```
pub fn is_question(text: &str) -> bool {
    if text.contains('?') {
        return true;
    }

    let lowered = text.to_lowercase();
    QUESTION_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_mark_qualifies() {
        assert!(is_question("is this on?"));
    }

    #[test]
    fn question_mark_mid_text_qualifies() {
        assert!(is_question("ready? let's begin"));
    }

    #[test]
    fn each_keyword_qualifies() {
        for kw in ["what", "how", "why", "explain", "tell me"] {
            assert!(is_question(kw), "keyword {kw:?} should qualify");
        }
    }

    #[test]
    fn keywords_match_case_insensitively() {
        assert!(is_question("WHAT is a closure"));
        assert!(is_question("Explain the borrow checker"));
        assert!(is_question("TELL ME about your last project"));
    }

    #[test]
    fn keyword_embedded_in_sentence_qualifies() {
        assert!(is_question("so how would you scale this"));
    }

    #[test]
    fn plain_statement_does_not_qualify() {
        assert!(!is_question("I finished the report yesterday"));
        assert!(!is_question("let's move on to the next topic"));
    }

    #[test]
    fn empty_text_does_not_qualify() {
        assert!(!is_question(""));
    }

    #[test]
    fn tell_without_me_does_not_qualify() {
        assert!(!is_question("tell the team we shipped"));
    }
}
