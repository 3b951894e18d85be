//! Google Gemini generateContent adapter.
//!
//! System messages become the `systemInstruction` field; assistant turns
//! use the `model` role.

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
    let mut system_parts: Vec<Value> = Vec::new();
    let mut contents: Vec<Value> = Vec::new();

    for msg in messages {
        let text = content_text(&msg.content);
        match msg.role {
            Role::System => system_parts.push(serde_json::json!({ "text": text })),
            Role::Assistant => contents.push(serde_json::json!({
                "role": "model",
                "parts": [{ "text": text }],
            })),
            _ => contents.push(serde_json::json!({
                "role": "user",
                "parts": [{ "text": text }],
            })),
        }
    }

    let mut generation_config = serde_json::json!({
        "maxOutputTokens": opts.max_tokens,
    });
    if let Some(temp) = opts.temperature {
        generation_config["temperature"] = serde_json::json!(temp);
    }

    let mut body = serde_json::json!({
        "contents": contents,
        "generationConfig": generation_config,
    });
    if !system_parts.is_empty() {
        body["systemInstruction"] = serde_json::json!({ "parts": system_parts });
    }

    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        model.base_url, model.model_id
    );
    let resp = client
        .post(&url)
        .header("x-goog-api-key", &opts.api_key)
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

    let blocks = payload["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .map(|text| ContentBlock::Text { text: text.into() })
                .collect()
        })
        .unwrap_or_default();

    Ok(blocks)
}
