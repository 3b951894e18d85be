//! Session store.
//!
//! Persists session state in `sessions.json` under the agent's sessions
//! directory. Each session key maps to a [`SessionEntry`] tracking the
//! current session ID. Resetting a session mints a new ID for the same
//! key; the old ID's transcript stays on disk so a handoff can still
//! read and archive it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use baton_domain::error::{Error, Result};
use baton_domain::trace::TraceEvent;

/// A single session tracked by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    pub session_key: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// The model last used in this session (e.g. `"anthropic/claude-sonnet-4-5"`).
    #[serde(default)]
    pub model: Option<String>,
}

/// JSON-file-backed session store keyed by session key.
pub struct SessionStore {
    sessions_path: PathBuf,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    /// Load or create the store at `<sessions_dir>/sessions.json`.
    pub fn new(sessions_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(sessions_dir).map_err(Error::Io)?;

        let sessions_path = sessions_dir.join("sessions.json");
        let sessions = if sessions_path.exists() {
            let raw = std::fs::read_to_string(&sessions_path).map_err(Error::Io)?;
            serde_json::from_str(&raw).unwrap_or_default()
        } else {
            HashMap::new()
        };

        tracing::info!(
            sessions = sessions.len(),
            path = %sessions_path.display(),
            "session store loaded"
        );

        Ok(Self {
            sessions_path,
            sessions: RwLock::new(sessions),
        })
    }

    /// Look up a session by its key.
    pub fn get(&self, session_key: &str) -> Option<SessionEntry> {
        self.sessions.read().get(session_key).cloned()
    }

    /// Resolve or create a session for the given key. Returns `(entry, is_new)`.
    pub fn resolve_or_create(&self, session_key: &str) -> (SessionEntry, bool) {
        // Fast path: session already exists.
        {
            let sessions = self.sessions.read();
            if let Some(entry) = sessions.get(session_key) {
                return (entry.clone(), false);
            }
        }

        let now = Utc::now();
        let session_id = uuid::Uuid::new_v4().to_string();
        let entry = SessionEntry {
            session_key: session_key.to_owned(),
            session_id: session_id.clone(),
            created_at: now,
            updated_at: now,
            model: None,
        };

        let mut sessions = self.sessions.write();
        sessions.insert(session_key.to_owned(), entry.clone());

        TraceEvent::SessionResolved {
            session_key: session_key.to_owned(),
            session_id,
            is_new: true,
        }
        .emit();

        (entry, true)
    }

    /// Record a session reset: mint a new session ID for the same key.
    /// Returns the updated entry, or `None` if the key is unknown.
    pub fn reset_session(&self, session_key: &str, reason: &str) -> Option<SessionEntry> {
        let mut sessions = self.sessions.write();
        let entry = sessions.get_mut(session_key)?;

        let old_id = entry.session_id.clone();
        let new_id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();

        entry.session_id = new_id.clone();
        entry.created_at = now;
        entry.updated_at = now;

        TraceEvent::SessionReset {
            session_key: session_key.to_owned(),
            old_session_id: old_id,
            new_session_id: new_id,
            reason: reason.to_owned(),
        }
        .emit();

        Some(entry.clone())
    }

    /// List all session entries.
    pub fn list(&self) -> Vec<SessionEntry> {
        self.sessions.read().values().cloned().collect()
    }

    /// Persist the current session state to disk.
    pub fn flush(&self) -> Result<()> {
        let sessions = self.sessions.read();
        let json = serde_json::to_string_pretty(&*sessions)
            .map_err(|e| Error::Other(format!("serializing sessions: {e}")))?;
        std::fs::write(&self.sessions_path, json).map_err(Error::Io)?;
        Ok(())
    }

    /// The directory holding `sessions.json` and per-session transcripts.
    pub fn dir(&self) -> PathBuf {
        self.sessions_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf()
    }
}
