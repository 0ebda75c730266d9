//! Model request builders and response unwrapping.
//!
//! The model is asked to answer inside small JSON envelopes
//! (`{"reply": ...}` for consultant replies, `{"prompt": ...}` for prompt
//! rewrites). It does not always comply, so extraction falls back to the raw
//! text.

use serde_json::Value;

use crate::domain::conversation::ContextMessage;

/// Rendered in place of an empty history inside improvement requests.
pub const NO_HISTORY_MARKER: &str = "No previous history";

const PROMPT_ENVELOPE: &str = r#"{ "prompt": "<updated prompt>" }"#;

/// The exchange a prompt improvement is based on.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackContext<'a> {
    pub client_sequence: &'a [String],
    pub chat_history: &'a [ContextMessage],
    /// What the human consultant actually answered.
    pub consultant_reply: &'a str,
    /// What the model predicted with the current system prompt.
    pub predicted_reply: &'a str,
}

fn transcript_lines<'a>(
    chat_history: &'a [ContextMessage],
    client_sequence: &'a [String],
) -> impl Iterator<Item = String> + 'a {
    chat_history
        .iter()
        .map(|msg| format!("{}: {}", msg.direction.speaker(), msg.text))
        .chain(client_sequence.iter().map(|text| format!("Client: {}", text)))
}

/// Builds the request that asks the model for the consultant's next reply.
pub fn reply_request(
    system_prompt: &str,
    client_sequence: &[String],
    chat_history: &[ContextMessage],
) -> String {
    let conversation = transcript_lines(chat_history, client_sequence)
        .collect::<Vec<_>>()
        .join("\n");

    format!("{system_prompt}\n\nConversation:\n{conversation}\n\nConsultant Reply:")
}

/// Builds the request that asks the model to improve the system prompt
/// after comparing its prediction with the real consultant reply.
pub fn improvement_request(
    editor_prompt: &str,
    existing_prompt: &str,
    feedback: &FeedbackContext<'_>,
) -> String {
    let history: String = transcript_lines(feedback.chat_history, &[])
        .map(|line| line + "\n")
        .collect();
    let history = if history.is_empty() {
        NO_HISTORY_MARKER.to_string()
    } else {
        history
    };
    let client = transcript_lines(&[], feedback.client_sequence)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Editor Prompt:\n{editor_prompt}\n\n\
         Current System Prompt:\n{existing_prompt}\n\n\
         Conversation Context:\nChat History:\n{history}\n\n\
         Client Sequence:\n{client}\n\n\
         Real Consultant Reply:\n{real}\n\n\
         AI Predicted Reply:\n{predicted}\n\n\
         Please analyze and improve the prompt. Output only JSON:\n{PROMPT_ENVELOPE}\n",
        real = feedback.consultant_reply,
        predicted = feedback.predicted_reply,
    )
}

/// Builds the request that applies a developer's instructions to the
/// system prompt.
pub fn manual_update_request(editor_prompt: &str, existing_prompt: &str, instructions: &str) -> String {
    format!(
        "Editor Prompt:\n{editor_prompt}\n\n\
         Current System Prompt:\n{existing_prompt}\n\n\
         Developer Instructions:\n{instructions}\n\n\
         Return only JSON:\n{PROMPT_ENVELOPE}\n"
    )
}

/// Unwraps a `{"reply": ...}` envelope, or returns the trimmed text.
pub fn extract_reply(raw: &str) -> String {
    let text = raw.trim();
    if !(text.starts_with('{') && text.contains("reply")) {
        return text.to_string();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(parsed) => match parsed.get("reply") {
            Some(Value::String(reply)) => reply.clone(),
            Some(other) => other.to_string(),
            None => text.to_string(),
        },
        Err(_) => text.to_string(),
    }
}

/// Unwraps a `{"prompt": ...}` envelope.
///
/// A valid envelope without a `prompt` key keeps `existing_prompt`; text that
/// is not valid JSON is returned trimmed as the new prompt.
pub fn extract_prompt(raw: &str, existing_prompt: &str) -> String {
    let text = raw.trim();
    if !text.starts_with('{') {
        return text.to_string();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(parsed) => match parsed.get("prompt") {
            Some(Value::String(prompt)) => prompt.clone(),
            Some(Value::Null) | None => existing_prompt.to_string(),
            Some(other) => other.to_string(),
        },
        Err(_) => text.to_string(),
    }
}
