//! Summary lookup.
//!
//! Read-only views over the handoff directory, derived from filesystem
//! contents at call time. Summary files are only ever created, never
//! mutated, so there is nothing to cache or invalidate.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use baton_domain::config::Config;

/// One summary file's directory entry.
#[derive(Debug, Clone)]
pub struct HandoffSummaryInfo {
    pub session_id: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// The newest summary's content plus its session id.
#[derive(Debug, Clone)]
pub struct LatestHandoffSummary {
    pub summary: String,
    pub session_id: String,
}

/// Enumerate `*.md` summaries in the agent's handoff directory, newest
/// first. Unreadable entries are silently skipped.
pub fn list_handoff_summaries(cfg: &Config, agent_id: Option<&str>) -> Vec<HandoffSummaryInfo> {
    let dir = cfg.handoff_dir(agent_id);
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };

    let mut infos: Vec<HandoffSummaryInfo> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(session_id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        // Creation time is unavailable on some filesystems; fall back to
        // mtime, which is equivalent for never-mutated files.
        let Ok(created) = meta.created().or_else(|_| meta.modified()) else {
            continue;
        };
        infos.push(HandoffSummaryInfo {
            session_id: session_id.to_string(),
            path,
            created_at: DateTime::<Utc>::from(created),
            size_bytes: meta.len(),
        });
    }

    infos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    infos
}

/// Read one summary file by session id. `None` if absent or unreadable.
pub fn read_handoff_summary(
    cfg: &Config,
    session_id: &str,
    agent_id: Option<&str>,
) -> Option<String> {
    let path = cfg.handoff_dir(agent_id).join(format!("{session_id}.md"));
    std::fs::read_to_string(path).ok()
}

/// The newest summary's content, or `None` if none exist.
pub fn read_latest_handoff_summary(
    cfg: &Config,
    agent_id: Option<&str>,
) -> Option<LatestHandoffSummary> {
    let infos = list_handoff_summaries(cfg, agent_id);
    let newest = infos.first()?;
    let summary = std::fs::read_to_string(&newest.path).ok()?;
    Some(LatestHandoffSummary {
        summary,
        session_id: newest.session_id.clone(),
    })
}

/// Strip the metadata header from a summary file's content, returning
/// the raw model-generated body.
pub fn summary_body(content: &str) -> &str {
    content
        .split_once("\n---\n\n")
        .map(|(_, body)| body)
        .unwrap_or(content)
}
