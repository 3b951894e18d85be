//! LLM provider plumbing for baton: model catalog, credential
//! resolution, and one-shot completion adapters for the Anthropic,
//! Google, and OpenAI-compatible APIs.

pub mod auth;
pub mod catalog;
pub mod traits;
pub mod util;

mod anthropic;
mod google;
mod openai_compat;

pub use auth::{ConfigCredentials, CredentialResolver};
pub use catalog::{ConfigCatalog, ModelCatalog, ResolvedModel};
pub use traits::{CallOptions, CompletionApi};
pub use util::resolve_api_key;

use std::time::Instant;

use baton_domain::config::ProviderKind;
use baton_domain::error::Result;
use baton_domain::message::{ContentBlock, TranscriptMessage};
use baton_domain::trace::TraceEvent;

/// Live [`CompletionApi`] over HTTP, routing by provider kind.
pub struct HttpCompletionApi {
    client: reqwest::Client,
}

impl HttpCompletionApi {
    /// The client carries no request timeout; callers own the wall-clock
    /// guard and cancel by dropping the future.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpCompletionApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CompletionApi for HttpCompletionApi {
    async fn complete(
        &self,
        model: &ResolvedModel,
        messages: &[TranscriptMessage],
        opts: &CallOptions,
    ) -> Result<Vec<ContentBlock>> {
        let started = Instant::now();
        let result = match model.provider {
            ProviderKind::Anthropic => {
                anthropic::complete(&self.client, model, messages, opts).await
            }
            ProviderKind::Google => google::complete(&self.client, model, messages, opts).await,
            ProviderKind::OpenaiCompat => {
                openai_compat::complete(&self.client, model, messages, opts).await
            }
        };

        TraceEvent::LlmRequest {
            provider: model.provider_id.clone(),
            model: model.model_id.clone(),
            duration_ms: started.elapsed().as_millis() as u64,
        }
        .emit();

        result
    }
}
