//! Shared domain types for baton: configuration, errors, the transcript
//! message model, and structured trace events.

pub mod config;
pub mod error;
pub mod message;
pub mod trace;

pub use config::{AgentConfig, AuthConfig, Config, LlmConfig, ProviderConfig, ProviderKind};
pub use error::{Error, Result};
pub use message::{ContentBlock, MessageContent, Role, TranscriptMessage};
pub use trace::TraceEvent;
