//! Archival & persistence.
//!
//! Two writes with different failure semantics: the transcript copy is
//! a best-effort backup (failure logs and yields `None`), while the
//! summary file is the handoff's deliverable — its write errors
//! propagate and fail the whole handoff.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use baton_domain::error::Result;
use baton_domain::trace::TraceEvent;

/// Metadata rendered into the summary file header.
pub(crate) struct SummaryMeta<'a> {
    pub session_key: &'a str,
    pub session_id: &'a str,
    pub created_at: DateTime<Utc>,
    pub message_count: usize,
    pub model: &'a str,
}

/// Copy (not move) the original transcript into the handoff directory
/// as `<sessionId>.transcript.jsonl`. The original stays in place for
/// the active reset flow. Returns `None` on any failure.
pub(crate) fn archive_transcript(
    candidates: &[PathBuf],
    handoff_dir: &Path,
    session_id: &str,
) -> Option<PathBuf> {
    let Some(source) = candidates.iter().find(|p| p.is_file()) else {
        tracing::warn!(
            session_id = session_id,
            "no transcript file found among candidates, skipping archive"
        );
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(handoff_dir) {
        tracing::warn!(
            session_id = session_id,
            error = %e,
            "could not create handoff directory, skipping archive"
        );
        return None;
    }

    let dest = handoff_dir.join(format!("{session_id}.transcript.jsonl"));
    match std::fs::copy(source, &dest) {
        Ok(_) => {
            TraceEvent::TranscriptArchived {
                session_id: session_id.to_owned(),
                path: dest.display().to_string(),
            }
            .emit();
            Some(dest)
        }
        Err(e) => {
            tracing::warn!(
                session_id = session_id,
                source = %source.display(),
                error = %e,
                "transcript archive copy failed"
            );
            None
        }
    }
}

/// Write the summary markdown file: metadata header, separator, body.
/// Creates the directory tree if absent. Errors propagate.
pub(crate) fn write_summary(
    handoff_dir: &Path,
    meta: &SummaryMeta<'_>,
    body: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(handoff_dir)?;
    let path = handoff_dir.join(format!("{}.md", meta.session_id));
    std::fs::write(&path, render_summary_file(meta, body))?;
    Ok(path)
}

fn render_summary_file(meta: &SummaryMeta<'_>, body: &str) -> String {
    format!(
        "# Session Handoff\n\
         \n\
         - session_id: {id}\n\
         - session_key: {key}\n\
         - created_at: {created}\n\
         - messages: {count}\n\
         - model: {model}\n\
         \n\
         ---\n\
         \n\
         {body}\n",
        id = meta.session_id,
        key = meta.session_key,
        created = meta.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        count = meta.message_count,
        model = meta.model,
    )
}
