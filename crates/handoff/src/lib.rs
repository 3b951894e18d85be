//! Session handoff pipeline.
//!
//! When a session ends, its transcript is summarized into a continuity
//! document for the next session: read messages → render bounded text →
//! pick the first workable (model, credential) pair from a priority
//! list → one completion call → archive the raw transcript (best
//! effort) and persist the summary (required).
//!
//! Each handoff is a single linear flow. Concurrent handoffs for
//! different sessions share nothing but the filesystem; a second
//! handoff for the same session overwrites by filename.

pub mod extract;
pub mod fallback;
pub mod lookup;
pub mod summarize;

mod archive;

pub use extract::{
    extract_transcript_text, MESSAGE_CHAR_LIMIT, MESSAGE_TRUNCATION_MARKER,
    MIDDLE_TRUNCATION_MARKER, TRANSCRIPT_CHAR_LIMIT,
};
pub use fallback::{select_summary_model, SelectedModel, FALLBACK_MODELS};
pub use lookup::{
    list_handoff_summaries, read_handoff_summary, read_latest_handoff_summary, summary_body,
    HandoffSummaryInfo, LatestHandoffSummary,
};
pub use summarize::{SUMMARY_MAX_TOKENS, SUMMARY_TEMPERATURE, SUMMARY_TIMEOUT};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;

use baton_domain::config::Config;
use baton_domain::error::Result;
use baton_domain::message::TranscriptMessage;
use baton_domain::trace::TraceEvent;
use baton_providers::{
    CompletionApi, ConfigCatalog, ConfigCredentials, CredentialResolver, HttpCompletionApi,
    ModelCatalog,
};
use baton_sessions::transcript::{
    read_session_messages, resolve_session_transcript_candidates,
};

/// Canned summary returned for sessions with no transcript messages.
pub const EMPTY_SESSION_SUMMARY: &str =
    "Empty session: no conversation to hand off.";

/// Identifies the session to hand off and where its transcript lives.
#[derive(Debug, Clone)]
pub struct HandoffRequest<'a> {
    pub session_key: &'a str,
    pub session_id: &'a str,
    /// Directory holding per-session transcript files.
    pub store_path: &'a Path,
    /// Explicit transcript file, when the caller already knows it.
    pub session_file: Option<&'a Path>,
    /// Agent whose handoff directory receives the output. `None` uses
    /// the configured agent.
    pub agent_id: Option<&'a str>,
}

/// Outcome of one handoff. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct HandoffResult {
    pub summary: String,
    /// `None` if the source transcript could not be located or copied
    /// (non-fatal).
    pub archived_transcript_path: Option<PathBuf>,
    /// `None` only for the empty-session short-circuit, where no files
    /// are written.
    pub summary_path: Option<PathBuf>,
    pub message_count: usize,
    pub latency_ms: u64,
}

/// The handoff pipeline with its collaborator seams.
pub struct HandoffPipeline {
    cfg: Arc<Config>,
    catalog: Arc<dyn ModelCatalog>,
    credentials: Arc<dyn CredentialResolver>,
    api: Arc<dyn CompletionApi>,
    timeout: Duration,
}

impl HandoffPipeline {
    /// Live pipeline: config-backed catalog and credentials, HTTP
    /// completion calls.
    pub fn from_config(cfg: Arc<Config>) -> Self {
        let catalog = Arc::new(ConfigCatalog::from_config(&cfg));
        let credentials = Arc::new(ConfigCredentials::from_config(&cfg));
        Self {
            cfg,
            catalog,
            credentials,
            api: Arc::new(HttpCompletionApi::new()),
            timeout: SUMMARY_TIMEOUT,
        }
    }

    /// Pipeline with explicit collaborators (tests, embedding).
    pub fn with_parts(
        cfg: Arc<Config>,
        catalog: Arc<dyn ModelCatalog>,
        credentials: Arc<dyn CredentialResolver>,
        api: Arc<dyn CompletionApi>,
    ) -> Self {
        Self {
            cfg,
            catalog,
            credentials,
            api,
            timeout: SUMMARY_TIMEOUT,
        }
    }

    /// Override the completion timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a full handoff: read the transcript, then summarize, archive,
    /// and persist.
    pub async fn perform_session_handoff(
        &self,
        req: &HandoffRequest<'_>,
    ) -> Result<HandoffResult> {
        let messages =
            read_session_messages(req.session_id, req.store_path, req.session_file)?;
        self.handoff_messages(req, &messages).await
    }

    /// Run a handoff over already-loaded messages. Callers that hold
    /// the transcript in memory (e.g. an active chat session) use this
    /// directly.
    pub async fn handoff_messages(
        &self,
        req: &HandoffRequest<'_>,
        messages: &[TranscriptMessage],
    ) -> Result<HandoffResult> {
        let started = Instant::now();

        if messages.is_empty() {
            tracing::info!(session_id = req.session_id, "empty session, nothing to hand off");
            return Ok(HandoffResult {
                summary: EMPTY_SESSION_SUMMARY.to_string(),
                archived_transcript_path: None,
                summary_path: None,
                message_count: 0,
                latency_ms: started.elapsed().as_millis() as u64,
            });
        }

        let transcript_text = extract_transcript_text(messages);

        let selection = select_summary_model(
            self.cfg.agent.default_model.as_deref(),
            self.catalog.as_ref(),
            self.credentials.as_ref(),
        )?;

        let summary = summarize::generate_summary(
            self.api.as_ref(),
            &selection,
            &transcript_text,
            self.timeout,
        )
        .await?;

        // Transcript archive first (best effort), then the summary —
        // the summary is the deliverable and its errors propagate.
        let handoff_dir = self.cfg.handoff_dir(req.agent_id);
        let candidates = resolve_session_transcript_candidates(
            req.session_id,
            req.store_path,
            req.session_file,
        );
        let archived_transcript_path =
            archive::archive_transcript(&candidates, &handoff_dir, req.session_id);

        let meta = archive::SummaryMeta {
            session_key: req.session_key,
            session_id: req.session_id,
            created_at: Utc::now(),
            message_count: messages.len(),
            model: &selection.model.spec(),
        };
        let summary_path = archive::write_summary(&handoff_dir, &meta, &summary)?;

        let latency_ms = started.elapsed().as_millis() as u64;
        TraceEvent::HandoffCompleted {
            session_id: req.session_id.to_owned(),
            message_count: messages.len(),
            latency_ms,
            archived: archived_transcript_path.is_some(),
        }
        .emit();

        Ok(HandoffResult {
            summary,
            archived_transcript_path,
            summary_path: Some(summary_path),
            message_count: messages.len(),
            latency_ms,
        })
    }
}
