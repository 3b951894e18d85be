//! OpenAI-compatible chat completions adapter.

use serde_json::Value;

use baton_domain::error::{Error, Result};
use baton_domain::message::{ContentBlock, Role, TranscriptMessage};

use crate::catalog::ResolvedModel;
use crate::traits::CallOptions;
use crate::util::{content_text, from_reqwest};

pub(crate) async fn complete(
    client: &reqwest::Client,
    model: &ResolvedModel,
    messages: &[TranscriptMessage],
    opts: &CallOptions,
) -> Result<Vec<ContentBlock>> {
    let api_messages: Vec<Value> = messages
        .iter()
        .map(|msg| {
            let role = match msg.role {
                Role::System => "system",
                Role::Assistant => "assistant",
                _ => "user",
            };
            serde_json::json!({
                "role": role,
                "content": content_text(&msg.content),
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "model": model.model_id,
        "messages": api_messages,
        "max_tokens": opts.max_tokens,
    });
    if let Some(temp) = opts.temperature {
        body["temperature"] = serde_json::json!(temp);
    }

    let url = format!("{}/v1/chat/completions", model.base_url);
    let resp = client
        .post(&url)
        .bearer_auth(&opts.api_key)
        .json(&body)
        .send()
        .await
        .map_err(from_reqwest)?;

    let status = resp.status();
    let payload: Value = resp.json().await.map_err(from_reqwest)?;
    if !status.is_success() {
        return Err(Error::Provider {
            provider: model.provider_id.clone(),
            message: format!("HTTP {status}: {payload}"),
        });
    }

    let text = payload["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![ContentBlock::Text { text: text.into() }])
}
