//! Credential resolution for summary-model candidates.
//!
//! Given a resolved model, find a usable API key. Lookup is silent on
//! absence (returns `None`) — the fallback loop treats a missing key as
//! "skip this candidate", not an error.

use baton_domain::config::{Config, ProviderConfig, ProviderKind};

use crate::catalog::ResolvedModel;
use crate::util::resolve_api_key;

/// Looks up an API key for a resolved model.
pub trait CredentialResolver: Send + Sync {
    /// Returns a non-empty, trimmed key, or `None` if no credential is
    /// available for this model's provider.
    fn api_key(&self, model: &ResolvedModel) -> Option<String>;
}

/// Config-backed resolver: the provider's configured auth section first,
/// then the provider's conventional environment variables.
pub struct ConfigCredentials {
    providers: Vec<ProviderConfig>,
}

impl ConfigCredentials {
    pub fn from_config(config: &Config) -> Self {
        Self {
            providers: config.llm.providers.clone(),
        }
    }
}

impl CredentialResolver for ConfigCredentials {
    fn api_key(&self, model: &ResolvedModel) -> Option<String> {
        if let Some(entry) = self.providers.iter().find(|p| p.id == model.provider_id) {
            match resolve_api_key(&entry.auth) {
                Ok(key) => {
                    let key = key.trim();
                    if !key.is_empty() {
                        return Some(key.to_string());
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        provider = %model.provider_id,
                        error = %e,
                        "configured auth did not yield a key, trying env convention"
                    );
                }
            }
        }

        conventional_env_key(model.provider)
    }
}

/// Well-known env vars per provider kind.
fn conventional_env_key(kind: ProviderKind) -> Option<String> {
    let vars: &[&str] = match kind {
        ProviderKind::Anthropic => &["ANTHROPIC_API_KEY"],
        ProviderKind::Google => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        ProviderKind::OpenaiCompat => &["OPENAI_API_KEY"],
    };
    for var in vars {
        if let Ok(val) = std::env::var(var) {
            let val = val.trim();
            if !val.is_empty() {
                return Some(val.to_string());
            }
        }
    }
    None
}
