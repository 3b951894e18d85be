//! Top-level configuration, loaded from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

// ── Agent ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Unique ID for this agent instance.
    #[serde(default = "default_agent_id")]
    pub agent_id: String,

    /// Root directory for per-agent state (sessions, handoff summaries).
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Preferred summary model, format `"provider/model"`
    /// (e.g. `"anthropic/claude-sonnet-4-5"`). Tried first during
    /// summary-model selection, before the built-in fallbacks.
    #[serde(default)]
    pub default_model: Option<String>,
}

// ── LLM providers ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmConfig {
    /// Registered LLM providers. Entries here override the built-in
    /// base URLs and credential lookup for their provider ID.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider ID as used in `"provider/model"` specs (e.g. `"anthropic"`).
    pub id: String,
    pub kind: ProviderKind,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Anthropic,
    Google,
    OpenaiCompat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Env var containing the key.
    #[serde(default)]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env or keychain).
    #[serde(default)]
    pub key: Option<String>,
    /// Keychain service name (e.g. `"baton"`).
    #[serde(default)]
    pub service: Option<String>,
    /// Keychain account name (e.g. `"anthropic-api-key"`).
    #[serde(default)]
    pub account: Option<String>,
}

// ── Defaults ───────────────────────────────────────────────────────

fn default_agent_id() -> String {
    "baton".into()
}

fn default_state_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".baton")
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_id: default_agent_id(),
            state_path: default_state_path(),
            default_model: None,
        }
    }
}

// ── Loading & paths ────────────────────────────────────────────────

impl Config {
    /// Load configuration from a TOML file, falling back to defaults for
    /// missing keys.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::error::Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load from file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Per-agent state root: `<state_path>/agents/<agentId>`.
    pub fn agent_dir(&self, agent_id: Option<&str>) -> PathBuf {
        let id = agent_id.unwrap_or(&self.agent.agent_id);
        self.agent.state_path.join("agents").join(id)
    }

    /// Session store + transcripts: `<agent-dir>/sessions`.
    pub fn sessions_dir(&self, agent_id: Option<&str>) -> PathBuf {
        self.agent_dir(agent_id).join("sessions")
    }

    /// Handoff summaries + archived transcripts, sibling to `sessions/`:
    /// `<agent-dir>/session-handoffs`.
    pub fn handoff_dir(&self, agent_id: Option<&str>) -> PathBuf {
        self.agent_dir(agent_id).join("session-handoffs")
    }
}
