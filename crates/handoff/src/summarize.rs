//! Summary generation.
//!
//! One completion request per handoff: a fixed instruction prompt plus
//! the extracted transcript wrapped in delimiter tags. Low temperature
//! favors faithfulness over creativity. There is no retry here —
//! fallback already happened at model selection.

use std::time::Duration;

use baton_domain::error::{Error, Result};
use baton_domain::message::{ContentBlock, TranscriptMessage};
use baton_providers::{CallOptions, CompletionApi};

use crate::fallback::SelectedModel;

pub const SUMMARY_MAX_TOKENS: u32 = 4_096;
pub const SUMMARY_TEMPERATURE: f32 = 0.2;

/// Hard wall-clock cap on the completion call. When it fires, the
/// in-flight request is dropped (cancelled), never leaked.
pub const SUMMARY_TIMEOUT: Duration = Duration::from_secs(120);

const SUMMARY_INSTRUCTIONS: &str = "\
You are writing a handoff summary for a chat session that is about to be \
reset. A fresh session will receive your summary as its only continuity \
context, so capture everything the next session needs to pick up where \
this one left off.

Structure the summary in exactly these seven sections:

1. Goal — what the user is ultimately trying to accomplish.
2. Current state — where things stand right now.
3. Completed work — what was finished during this session.
4. In progress — work that was started but not finished.
5. Decisions & constraints — choices made, and limits to respect.
6. Open questions — unresolved issues the next session should address.
7. Next steps — the concrete actions to take first.

Keep the whole summary under 2000 words. Be specific: prefer file names, \
commands, and identifiers over vague descriptions. Never reproduce secret \
values (API keys, tokens, passwords) even if they appear in the \
transcript — refer to them by name only.";

/// Build the two-message prompt for a handoff summary.
fn build_prompt(transcript_text: &str) -> Vec<TranscriptMessage> {
    vec![
        TranscriptMessage::system(SUMMARY_INSTRUCTIONS),
        TranscriptMessage::user(format!("<transcript>\n{transcript_text}\n</transcript>")),
    ]
}

/// Issue the completion call and extract its text.
pub(crate) async fn generate_summary(
    api: &dyn CompletionApi,
    selection: &SelectedModel,
    transcript_text: &str,
    timeout: Duration,
) -> Result<String> {
    let messages = build_prompt(transcript_text);
    let opts = CallOptions {
        api_key: selection.api_key.clone(),
        max_tokens: SUMMARY_MAX_TOKENS,
        temperature: Some(SUMMARY_TEMPERATURE),
    };

    let blocks = tokio::time::timeout(
        timeout,
        api.complete(&selection.model, &messages, &opts),
    )
    .await
    .map_err(|_| {
        Error::Timeout(format!(
            "summary completion exceeded {}s",
            timeout.as_secs()
        ))
    })??;

    let summary = blocks
        .iter()
        .filter_map(ContentBlock::text)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    if summary.is_empty() {
        return Err(Error::Provider {
            provider: selection.model.provider_id.clone(),
            message: "completion returned no text content".into(),
        });
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use baton_domain::message::{MessageContent, Role};

    #[test]
    fn prompt_wraps_transcript_in_tags() {
        let messages = build_prompt("[user]: hi");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        let MessageContent::Text(ref user) = messages[1].content else {
            panic!("expected text");
        };
        assert!(user.starts_with("<transcript>\n"));
        assert!(user.ends_with("\n</transcript>"));
        assert!(user.contains("[user]: hi"));
    }

    #[test]
    fn instructions_forbid_secrets() {
        // The instruction prompt is part of the contract: structured
        // sections, word budget, and no secret values.
        assert!(SUMMARY_INSTRUCTIONS.contains("seven sections"));
        assert!(SUMMARY_INSTRUCTIONS.contains("2000 words"));
        assert!(SUMMARY_INSTRUCTIONS.contains("secret"));
    }
}
