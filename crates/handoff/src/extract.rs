//! Transcript text extraction.
//!
//! Builds the bounded plain-text rendering of a session transcript that
//! is fed to the summary model. Two caps apply: each message's text is
//! truncated to [`MESSAGE_CHAR_LIMIT`], and the joined transcript to
//! [`TRANSCRIPT_CHAR_LIMIT`] — keeping the first and last halves, since
//! the session's opening context and most recent state matter most for
//! continuity. Extraction never fails; malformed content degrades to
//! empty text for that message.

use baton_domain::message::{ContentBlock, MessageContent, Role, TranscriptMessage};

/// Per-message cap, in bytes at a char boundary.
pub const MESSAGE_CHAR_LIMIT: usize = 5_000;

/// Whole-transcript cap, in bytes at char boundaries.
pub const TRANSCRIPT_CHAR_LIMIT: usize = 150_000;

/// Suffix appended to an over-long message.
pub const MESSAGE_TRUNCATION_MARKER: &str = "... [truncated]";

/// Splice inserted where the transcript's middle was dropped.
pub const MIDDLE_TRUNCATION_MARKER: &str =
    "\n\n... [middle of conversation truncated for length] ...\n\n";

/// Render a transcript as bounded plain text, one `"[role]: text"` line
/// per non-system message, blank lines between messages.
pub fn extract_transcript_text(messages: &[TranscriptMessage]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for msg in messages {
        if msg.role == Role::System {
            continue;
        }
        let text = message_text(msg);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        lines.push(format!("[{}]: {}", msg.role, truncate_message(text)));
    }
    cap_transcript(lines.join("\n\n"))
}

/// A message's plain text: string content verbatim; block content keeps
/// text variants and replaces tool calls with a compact placeholder so
/// large argument payloads never reach the summary model.
fn message_text(msg: &TranscriptMessage) -> String {
    match &msg.content {
        MessageContent::Text(t) => t.clone(),
        MessageContent::Blocks(blocks) => {
            let mut parts: Vec<String> = Vec::new();
            for block in blocks {
                if let Some(text) = block.text() {
                    parts.push(text.to_string());
                } else if let ContentBlock::ToolCall { name, .. } = block {
                    parts.push(format!("[tool call: {name}]"));
                }
            }
            parts.join("\n")
        }
    }
}

fn truncate_message(text: &str) -> String {
    if text.len() <= MESSAGE_CHAR_LIMIT {
        return text.to_string();
    }
    let boundary = floor_char_boundary(text, MESSAGE_CHAR_LIMIT);
    format!("{}{}", &text[..boundary], MESSAGE_TRUNCATION_MARKER)
}

fn cap_transcript(text: String) -> String {
    if text.len() <= TRANSCRIPT_CHAR_LIMIT {
        return text;
    }
    let half = TRANSCRIPT_CHAR_LIMIT / 2;
    let head_end = floor_char_boundary(&text, half);
    let tail_start = ceil_char_boundary(&text, text.len() - half);
    format!(
        "{}{}{}",
        &text[..head_end],
        MIDDLE_TRUNCATION_MARKER,
        &text[tail_start..]
    )
}

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest char boundary at or above `index`.
fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
