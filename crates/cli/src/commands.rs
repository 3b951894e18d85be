//! Command handlers.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};

use baton_domain::config::Config;
use baton_handoff::{
    list_handoff_summaries, read_handoff_summary, read_latest_handoff_summary, HandoffPipeline,
    HandoffRequest,
};
use baton_sessions::SessionStore;

/// Run one handoff and report where the summary landed.
pub async fn run_handoff(
    config: Config,
    agent: Option<&str>,
    session_key: &str,
    session_id: &str,
    store_path: Option<&Path>,
    session_file: Option<&Path>,
) -> anyhow::Result<()> {
    let store_path = store_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.sessions_dir(agent));

    let pipeline = HandoffPipeline::from_config(Arc::new(config));
    let result = pipeline
        .perform_session_handoff(&HandoffRequest {
            session_key,
            session_id,
            store_path: &store_path,
            session_file,
            agent_id: agent,
        })
        .await
        .context("session handoff failed")?;

    match result.summary_path {
        Some(path) => {
            println!(
                "Handoff complete: {} messages summarized in {}ms",
                result.message_count, result.latency_ms
            );
            println!("Summary: {}", path.display());
            match result.archived_transcript_path {
                Some(archive) => println!("Transcript archived: {}", archive.display()),
                None => println!("Transcript archive skipped (source not found)"),
            }
        }
        None => println!("Session is empty; nothing written."),
    }
    Ok(())
}

/// Hand off the session's current transcript, then mint a new session ID.
/// A failed handoff falls back to a plain reset — the reset itself must
/// never be blocked by summarization.
pub async fn run_reset(
    config: Config,
    agent: Option<&str>,
    session_key: &str,
    reason: &str,
) -> anyhow::Result<()> {
    let sessions_dir = config.sessions_dir(agent);
    let store = SessionStore::new(&sessions_dir)?;
    let Some(entry) = store.get(session_key) else {
        bail!("unknown session key: {session_key}");
    };

    let pipeline = HandoffPipeline::from_config(Arc::new(config));
    match pipeline
        .perform_session_handoff(&HandoffRequest {
            session_key,
            session_id: &entry.session_id,
            store_path: &sessions_dir,
            session_file: None,
            agent_id: agent,
        })
        .await
    {
        Ok(result) => {
            if let Some(path) = result.summary_path {
                println!("Handoff summary: {}", path.display());
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "handoff failed, falling back to plain reset");
            println!("Handoff summary skipped: {e}");
        }
    }

    let entry = store
        .reset_session(session_key, reason)
        .context("session disappeared during reset")?;
    store.flush()?;
    println!("Session reset: new session id {}", entry.session_id);
    Ok(())
}

pub fn run_summaries_list(config: &Config, agent: Option<&str>) -> anyhow::Result<()> {
    let infos = list_handoff_summaries(config, agent);
    if infos.is_empty() {
        println!("No handoff summaries.");
        return Ok(());
    }
    for info in infos {
        println!(
            "{}  {}  {} bytes",
            info.created_at.format("%Y-%m-%d %H:%M:%S"),
            info.session_id,
            info.size_bytes
        );
    }
    Ok(())
}

pub fn run_summaries_show(
    config: &Config,
    agent: Option<&str>,
    session_id: &str,
) -> anyhow::Result<()> {
    match read_handoff_summary(config, session_id, agent) {
        Some(content) => {
            print!("{content}");
            Ok(())
        }
        None => bail!("no summary for session {session_id}"),
    }
}

pub fn run_summaries_latest(config: &Config, agent: Option<&str>) -> anyhow::Result<()> {
    match read_latest_handoff_summary(config, agent) {
        Some(latest) => {
            eprintln!("(session {})", latest.session_id);
            print!("{}", latest.summary);
            Ok(())
        }
        None => bail!("no handoff summaries yet"),
    }
}
