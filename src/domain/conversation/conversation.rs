//! Conversation: an ordered transcript plus its metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::Message;

/// Label used in errors for a conversation without a contact id.
pub const UNIDENTIFIED_CONVERSATION: &str = "<unidentified>";

/// An ordered, already-chronological sequence of messages.
///
/// The order is never changed. On the wire the messages live under the
/// `conversation` key.
///
/// Decoding never fails. A numeric or boolean `contact_id` or `scenario` is
/// kept as its JSON text and any other non-string value is dropped. A
/// `conversation` value that is not an array marks the transcript as
/// malformed so the segmenter can report it for this conversation alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Conversation {
    contact_id: Option<String>,
    scenario: Option<String>,
    #[serde(rename = "conversation")]
    messages: Vec<Message>,
    #[serde(skip)]
    malformed_transcript: bool,
}

fn scalar_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        number @ Value::Number(_) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

impl From<Value> for Conversation {
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self {
                malformed_transcript: true,
                ..Self::default()
            };
        };

        let (messages, malformed_transcript) = match fields.remove("conversation") {
            None | Some(Value::Null) => (Vec::new(), false),
            Some(Value::Array(entries)) => (entries.into_iter().map(Message::from).collect(), false),
            Some(_) => (Vec::new(), true),
        };

        Self {
            contact_id: scalar_text(fields.remove("contact_id")),
            scenario: scalar_text(fields.remove("scenario")),
            messages,
            malformed_transcript,
        }
    }
}

impl Conversation {
    /// Creates a conversation with no metadata.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            contact_id: None,
            scenario: None,
            messages,
            malformed_transcript: false,
        }
    }

    pub fn with_contact_id(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    pub fn contact_id(&self) -> Option<&str> {
        self.contact_id.as_deref()
    }

    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True when the input carried something other than a list of messages.
    pub fn has_malformed_transcript(&self) -> bool {
        self.malformed_transcript
    }

    /// Human-readable identifier for error reports.
    pub fn label(&self) -> &str {
        self.contact_id().unwrap_or(UNIDENTIFIED_CONVERSATION)
    }
}
