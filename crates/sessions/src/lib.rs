//! Session state and transcripts for baton.
//!
//! A session key maps to the current session ID; resetting mints a new
//! ID for the same key. Transcripts live alongside the store as JSONL
//! files and are read (never written) by this crate.

pub mod store;
pub mod transcript;

pub use store::{SessionEntry, SessionStore};
pub use transcript::{read_session_messages, resolve_session_transcript_candidates};
