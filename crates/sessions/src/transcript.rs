//! Transcript reading.
//!
//! Transcripts are append-only JSONL files, one [`TranscriptMessage`]
//! per line, written by the chat layer. This module only consumes them:
//! it probes a small set of store-specific candidate paths and parses
//! whichever exists first. Malformed lines are skipped, not fatal.

use std::path::{Path, PathBuf};

use baton_domain::error::{Error, Result};
use baton_domain::message::TranscriptMessage;

/// Candidate file paths for a session's transcript, probed in order.
pub fn resolve_session_transcript_candidates(
    session_id: &str,
    store_path: &Path,
    session_file: Option<&Path>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(file) = session_file {
        candidates.push(file.to_path_buf());
    }
    candidates.push(store_path.join(format!("{session_id}.jsonl")));
    candidates.push(store_path.join("transcripts").join(format!("{session_id}.jsonl")));
    candidates
}

/// Read a session's transcript messages.
///
/// Probes the candidate paths in order and parses the first one that
/// exists. A session with no transcript file yields an empty vector.
pub fn read_session_messages(
    session_id: &str,
    store_path: &Path,
    session_file: Option<&Path>,
) -> Result<Vec<TranscriptMessage>> {
    for path in resolve_session_transcript_candidates(session_id, store_path, session_file) {
        if path.exists() {
            return read_jsonl_file(&path, session_id);
        }
    }
    Ok(Vec::new())
}

/// Read and parse a JSONL transcript file, skipping malformed lines.
fn read_jsonl_file(path: &Path, session_id: &str) -> Result<Vec<TranscriptMessage>> {
    let raw = std::fs::read_to_string(path).map_err(Error::Io)?;
    let mut messages = Vec::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<TranscriptMessage>(line) {
            Ok(msg) => messages.push(msg),
            Err(e) => {
                tracing::warn!(
                    session_id = session_id,
                    error = %e,
                    "skipping malformed transcript line"
                );
            }
        }
    }
    Ok(messages)
}
