use serde::Serialize;

/// Structured trace events emitted across all baton crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    SessionResolved {
        session_key: String,
        session_id: String,
        is_new: bool,
    },
    SessionReset {
        session_key: String,
        old_session_id: String,
        new_session_id: String,
        reason: String,
    },
    SummaryModelSelected {
        provider: String,
        model: String,
        candidates_tried: usize,
    },
    LlmRequest {
        provider: String,
        model: String,
        duration_ms: u64,
    },
    TranscriptArchived {
        session_id: String,
        path: String,
    },
    HandoffCompleted {
        session_id: String,
        message_count: usize,
        latency_ms: u64,
        archived: bool,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "baton_event");
    }
}
