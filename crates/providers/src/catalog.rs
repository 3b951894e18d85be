//! Model catalog.
//!
//! Maps `(provider, model-id)` pairs to concrete [`ResolvedModel`]
//! descriptors. Resolution fails silently (returns `None`) on unknown
//! providers or models — the summary-model fallback loop relies on that
//! to skip candidates without aborting.

use baton_domain::config::{Config, ProviderConfig, ProviderKind};

/// A concrete, addressable model: provider kind, wire model ID, and the
/// base URL its adapter should call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub provider: ProviderKind,
    pub provider_id: String,
    pub model_id: String,
    pub base_url: String,
}

impl ResolvedModel {
    /// `"provider/model"` spec string, as used in config and errors.
    pub fn spec(&self) -> String {
        format!("{}/{}", self.provider_id, self.model_id)
    }
}

/// Resolves `(provider, model)` pairs to model descriptors.
pub trait ModelCatalog: Send + Sync {
    fn resolve(&self, provider: &str, model: &str) -> Option<ResolvedModel>;
}

// ── Built-in providers & models ────────────────────────────────────

const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com";
const DEFAULT_GOOGLE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";

/// Models the catalog knows without any configuration.
const KNOWN_MODELS: &[(&str, &str)] = &[
    ("anthropic", "claude-opus-4-5"),
    ("anthropic", "claude-sonnet-4-5"),
    ("anthropic", "claude-haiku-4-5"),
    ("google", "gemini-2.0-flash"),
    ("google", "gemini-2.5-flash"),
    ("google", "gemini-2.5-pro"),
    ("openai", "gpt-4o"),
    ("openai", "gpt-4o-mini"),
];

fn builtin_kind(provider: &str) -> Option<ProviderKind> {
    match provider {
        "anthropic" => Some(ProviderKind::Anthropic),
        "google" => Some(ProviderKind::Google),
        "openai" => Some(ProviderKind::OpenaiCompat),
        _ => None,
    }
}

fn default_base_url(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Anthropic => DEFAULT_ANTHROPIC_URL,
        ProviderKind::Google => DEFAULT_GOOGLE_URL,
        ProviderKind::OpenaiCompat => DEFAULT_OPENAI_URL,
    }
}

// ── Config-backed catalog ──────────────────────────────────────────

/// Catalog combining the built-in model table with config-registered
/// providers. A config entry with a built-in ID overrides that
/// provider's base URL; an entry with a custom ID accepts any model
/// (the operator registered it deliberately).
pub struct ConfigCatalog {
    providers: Vec<ProviderConfig>,
}

impl ConfigCatalog {
    pub fn from_config(config: &Config) -> Self {
        Self {
            providers: config.llm.providers.clone(),
        }
    }

    fn config_entry(&self, provider: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == provider)
    }
}

impl ModelCatalog for ConfigCatalog {
    fn resolve(&self, provider: &str, model: &str) -> Option<ResolvedModel> {
        let entry = self.config_entry(provider);

        let kind = match (builtin_kind(provider), entry) {
            (Some(kind), _) => kind,
            (None, Some(entry)) => entry.kind,
            (None, None) => return None,
        };

        // Built-in providers only resolve models from the known table;
        // custom config providers accept any model ID.
        if builtin_kind(provider).is_some()
            && !KNOWN_MODELS.contains(&(provider, model))
        {
            return None;
        }

        let base_url = entry
            .and_then(|e| e.base_url.clone())
            .unwrap_or_else(|| default_base_url(kind).to_string());

        Some(ResolvedModel {
            provider: kind,
            provider_id: provider.to_string(),
            model_id: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}
