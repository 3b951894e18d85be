//! Anthropic Messages API adapter.
//!
//! System messages are hoisted into the top-level `system` field, per
//! the Anthropic message structure.

use serde_json::Value;

use baton_domain::error::{Error, Result};
use baton_domain::message::{ContentBlock, Role, TranscriptMessage};

use crate::catalog::ResolvedModel;
use crate::traits::CallOptions;
use crate::util::{content_text, from_reqwest};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub(crate) async fn complete(
    client: &reqwest::Client,
    model: &ResolvedModel,
    messages: &[TranscriptMessage],
    opts: &CallOptions,
) -> Result<Vec<ContentBlock>> {
    let mut system_parts: Vec<String> = Vec::new();
    let mut api_messages: Vec<Value> = Vec::new();

    for msg in messages {
        let text = content_text(&msg.content);
        match msg.role {
            Role::System => system_parts.push(text),
            Role::Assistant => api_messages.push(serde_json::json!({
                "role": "assistant",
                "content": text,
            })),
            _ => api_messages.push(serde_json::json!({
                "role": "user",
                "content": text,
            })),
        }
    }

    let mut body = serde_json::json!({
        "model": model.model_id,
        "messages": api_messages,
        "max_tokens": opts.max_tokens,
    });
    if !system_parts.is_empty() {
        body["system"] = Value::String(system_parts.join("\n\n"));
    }
    if let Some(temp) = opts.temperature {
        body["temperature"] = serde_json::json!(temp);
    }

    let url = format!("{}/v1/messages", model.base_url);
    let resp = client
        .post(&url)
        .header("x-api-key", &opts.api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .header("Content-Type", "application/json")
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

    let blocks = payload["content"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter(|item| item["type"] == "text")
                .filter_map(|item| item["text"].as_str())
                .map(|text| ContentBlock::Text { text: text.into() })
                .collect()
        })
        .unwrap_or_default();

    Ok(blocks)
}
