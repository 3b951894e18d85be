//! Summary-model selection.
//!
//! A handoff must not be blocked by a misconfigured primary model, so
//! selection walks a fixed priority list — the agent's configured
//! default first, then known-good fallbacks — and takes the first
//! candidate that both resolves and has a credential. Failures inside
//! the loop are swallowed (with a debug breadcrumb naming the stage);
//! only exhausting the whole list is an error.

use baton_domain::error::{Error, Result};
use baton_domain::trace::TraceEvent;
use baton_providers::{CredentialResolver, ModelCatalog, ResolvedModel};

/// Fallback candidates, tried after the configured default, in order.
pub const FALLBACK_MODELS: &[(&str, &str)] = &[
    ("anthropic", "claude-sonnet-4-5"),
    ("anthropic", "claude-haiku-4-5"),
    ("google", "gemini-2.0-flash"),
    ("openai", "gpt-4o-mini"),
];

/// A workable (model, credential) pair.
#[derive(Debug, Clone)]
pub struct SelectedModel {
    pub model: ResolvedModel,
    pub api_key: String,
}

/// First-match-wins search over the candidate list. Later candidates
/// are not probed once one succeeds.
pub fn select_summary_model(
    default_model: Option<&str>,
    catalog: &dyn ModelCatalog,
    credentials: &dyn CredentialResolver,
) -> Result<SelectedModel> {
    let mut candidates: Vec<(String, String)> = Vec::new();
    if let Some(spec) = default_model {
        match spec.split_once('/') {
            Some((provider, model)) => {
                candidates.push((provider.to_string(), model.to_string()));
            }
            None => {
                tracing::debug!(spec = %spec, "default model is not provider/model, skipping");
            }
        }
    }
    candidates.extend(
        FALLBACK_MODELS
            .iter()
            .map(|(p, m)| (p.to_string(), m.to_string())),
    );

    for (idx, (provider, model_id)) in candidates.iter().enumerate() {
        let Some(model) = catalog.resolve(provider, model_id) else {
            tracing::debug!(
                candidate = %format!("{provider}/{model_id}"),
                "summary model candidate unknown, skipping"
            );
            continue;
        };
        let Some(api_key) = credentials.api_key(&model) else {
            tracing::debug!(
                candidate = %model.spec(),
                "no credential for summary model candidate, skipping"
            );
            continue;
        };

        TraceEvent::SummaryModelSelected {
            provider: model.provider_id.clone(),
            model: model.model_id.clone(),
            candidates_tried: idx + 1,
        }
        .emit();

        return Ok(SelectedModel { model, api_key });
    }

    let attempted = candidates
        .iter()
        .map(|(p, m)| format!("{p}/{m}"))
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::NoUsableModel(attempted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use baton_domain::config::ProviderKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Catalog that resolves every Nth-and-later call, counting probes.
    struct FakeCatalog {
        calls: AtomicUsize,
        succeed_from_call: usize,
    }

    impl FakeCatalog {
        fn succeeding_from(call: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                succeed_from_call: call,
            }
        }
    }

    impl ModelCatalog for FakeCatalog {
        fn resolve(&self, provider: &str, model: &str) -> Option<ResolvedModel> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call < self.succeed_from_call {
                return None;
            }
            Some(ResolvedModel {
                provider: ProviderKind::Anthropic,
                provider_id: provider.to_string(),
                model_id: model.to_string(),
                base_url: "https://example.com".into(),
            })
        }
    }

    struct FakeCredentials {
        calls: AtomicUsize,
        key: Option<String>,
    }

    impl FakeCredentials {
        fn with_key(key: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                key: Some(key.to_string()),
            }
        }
        fn empty() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                key: None,
            }
        }
    }

    impl CredentialResolver for FakeCredentials {
        fn api_key(&self, _model: &ResolvedModel) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.key.clone()
        }
    }

    #[test]
    fn first_candidate_wins_when_usable() {
        let catalog = FakeCatalog::succeeding_from(1);
        let creds = FakeCredentials::with_key("sk-1");
        let selected =
            select_summary_model(Some("anthropic/claude-sonnet-4-5"), &catalog, &creds).unwrap();
        assert_eq!(selected.model.spec(), "anthropic/claude-sonnet-4-5");
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn third_candidate_selected_and_no_later_probes() {
        // No configured default: candidates are exactly FALLBACK_MODELS.
        let catalog = FakeCatalog::succeeding_from(3);
        let creds = FakeCredentials::with_key("sk-3");
        let selected = select_summary_model(None, &catalog, &creds).unwrap();

        let (provider, model) = FALLBACK_MODELS[2];
        assert_eq!(selected.model.spec(), format!("{provider}/{model}"));
        // Three resolution probes, one credential lookup, nothing after.
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 3);
        assert_eq!(creds.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn exhaustion_lists_all_candidates_in_order() {
        let catalog = FakeCatalog::succeeding_from(1);
        let creds = FakeCredentials::empty();
        let err = select_summary_model(Some("custom/my-model"), &catalog, &creds).unwrap_err();
        let msg = err.to_string();

        let mut specs = vec!["custom/my-model".to_string()];
        specs.extend(FALLBACK_MODELS.iter().map(|(p, m)| format!("{p}/{m}")));

        let mut last_pos = 0;
        for spec in &specs {
            let pos = msg[last_pos..]
                .find(spec.as_str())
                .unwrap_or_else(|| panic!("missing or out-of-order candidate: {spec}"));
            last_pos += pos + spec.len();
        }
    }

    #[test]
    fn malformed_default_spec_is_skipped() {
        let catalog = FakeCatalog::succeeding_from(1);
        let creds = FakeCredentials::with_key("sk");
        let selected = select_summary_model(Some("not-a-spec"), &catalog, &creds).unwrap();
        // Falls straight through to the first fixed fallback.
        let (provider, model) = FALLBACK_MODELS[0];
        assert_eq!(selected.model.spec(), format!("{provider}/{model}"));
    }

    #[test]
    fn no_credentials_anywhere_is_error() {
        struct BlankCreds;
        impl CredentialResolver for BlankCreds {
            fn api_key(&self, _model: &ResolvedModel) -> Option<String> {
                None
            }
        }
        let catalog = FakeCatalog::succeeding_from(1);
        let err = select_summary_model(None, &catalog, &BlankCreds).unwrap_err();
        assert!(matches!(err, Error::NoUsableModel(_)));
    }
}
