use baton_domain::error::Result;
use baton_domain::message::{ContentBlock, TranscriptMessage};

use crate::catalog::ResolvedModel;

/// Options for a single completion call.
#[derive(Debug, Clone)]
pub struct CallOptions {
    /// Resolved API key for the model's provider.
    pub api_key: String,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Sampling temperature. `None` lets the provider choose.
    pub temperature: Option<f32>,
}

/// A single blocking text-completion call.
///
/// Implementations translate between the internal message model and each
/// provider's wire format. No streaming, no tool use: callers get the
/// response's content blocks once the request finishes. Cancellation is
/// the caller's concern — dropping the returned future aborts the
/// in-flight request.
#[async_trait::async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(
        &self,
        model: &ResolvedModel,
        messages: &[TranscriptMessage],
        opts: &CallOptions,
    ) -> Result<Vec<ContentBlock>>;
}
