//! Transcript message model.
//!
//! Every transcript line is a [`TranscriptMessage`] — a tagged union
//! validated once at the store boundary, so downstream code never probes
//! untyped JSON. Deserialization is deliberately lenient: unknown roles
//! and block kinds collapse to `Unknown` variants instead of failing the
//! whole line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a chat session transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub content: MessageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    #[serde(alias = "tool-result", alias = "tool")]
    ToolResult,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Lowercase label used in extracted transcript lines.
    pub fn label(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::ToolResult => "tool_result",
            Role::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Message content: either a plain string or an ordered block sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Text(String::new())
    }
}

/// A typed content block within a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    OutputText {
        #[serde(default)]
        text: String,
    },
    InputText {
        #[serde(default)]
        text: String,
    },
    #[serde(alias = "tool_use")]
    ToolCall {
        #[serde(default)]
        name: String,
        #[serde(default)]
        arguments: serde_json::Value,
    },
    ToolResult {
        #[serde(default)]
        content: serde_json::Value,
    },
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    /// The block's text, for text-typed variants only.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text }
            | ContentBlock::OutputText { text }
            | ContentBlock::InputText { text } => Some(text.as_str()),
            _ => None,
        }
    }
}

// ── Convenience constructors ───────────────────────────────────────

impl TranscriptMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self::with_role(Role::System, text)
    }
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(Role::User, text)
    }
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, text)
    }

    fn with_role(role: Role, text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            role,
            content: MessageContent::Text(text.into()),
            metadata: None,
        }
    }
}
