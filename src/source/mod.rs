//! Transcript sources — concrete producers of transcript fragments.
//!
//! The speech recogniser itself lives outside this crate; a source is
//! anything that turns its output into timestamped
//! [`SessionEvent::Transcript`](crate::session::SessionEvent) events.
//! [`StdinSource`] is the built-in producer the binary uses: one line of
//! stdin is one fragment, which makes the whole pipeline drivable from a
//! terminal or a piped recogniser process.

pub mod stdin;

pub use stdin::StdinSource;
