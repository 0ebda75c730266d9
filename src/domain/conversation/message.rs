//! Transcript entries.
//!
//! A [`Message`] is one line of a consultant/customer transcript as it arrives
//! on the wire. `direction` and `text` are optional at this level: the
//! segmenter checks for them only when it actually needs them, and reports a
//! missing field as a `MalformedMessage` error instead of guessing a value.
//!
//! Decoding a `Message` never fails. Exports are hand-edited often enough
//! that one odd entry must not take the rest of a batch down with it:
//!
//! - a non-string `direction` is kept as [`Direction::Unrecognized`]
//! - a non-string `text` is treated as absent
//! - an entry that is not a JSON object has neither field

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Direction of a message relative to the consulting party.
///
/// Serialized as `"in"` / `"out"`. Any other string is kept verbatim as
/// [`Direction::Unrecognized`]; such messages never start or extend a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    /// From the customer.
    Inbound,
    /// From the consultant.
    Outbound,
    /// Any other direction value found in the transcript.
    Unrecognized(String),
}

impl Direction {
    /// Wire representation of this direction.
    pub fn as_str(&self) -> &str {
        match self {
            Direction::Inbound => "in",
            Direction::Outbound => "out",
            Direction::Unrecognized(raw) => raw,
        }
    }

    pub fn is_inbound(&self) -> bool {
        matches!(self, Direction::Inbound)
    }

    pub fn is_outbound(&self) -> bool {
        matches!(self, Direction::Outbound)
    }

    /// Speaker label used when rendering a transcript for the model.
    ///
    /// Everything that is not inbound is rendered as the consultant.
    pub fn speaker(&self) -> &'static str {
        if self.is_inbound() {
            "Client"
        } else {
            "Consultant"
        }
    }
}

impl From<String> for Direction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "in" => Direction::Inbound,
            "out" => Direction::Outbound,
            _ => Direction::Unrecognized(raw),
        }
    }
}

impl From<&str> for Direction {
    fn from(raw: &str) -> Self {
        Direction::from(raw.to_string())
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript entry as received.
///
/// `message_id` and `timestamp` are opaque JSON values carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Message {
    #[serde(default)]
    direction: Option<Direction>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    message_id: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
}

impl Message {
    /// Creates a message with the given direction and text.
    pub fn new(direction: impl Into<Direction>, text: impl Into<String>) -> Self {
        Self {
            direction: Some(direction.into()),
            text: Some(text.into()),
            message_id: None,
            timestamp: None,
        }
    }

    /// Creates a customer message.
    pub fn inbound(text: impl Into<String>) -> Self {
        Self::new(Direction::Inbound, text)
    }

    /// Creates a consultant message.
    pub fn outbound(text: impl Into<String>) -> Self {
        Self::new(Direction::Outbound, text)
    }

    /// Sets the opaque message identifier.
    pub fn with_message_id(mut self, message_id: impl Into<Value>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Sets the opaque ordering value.
    pub fn with_timestamp(mut self, timestamp: impl Into<Value>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Removes the text, producing a message the segmenter rejects.
    #[cfg(test)]
    pub(crate) fn without_text(mut self) -> Self {
        self.text = None;
        self
    }

    /// Removes the direction, producing a message the segmenter rejects.
    #[cfg(test)]
    pub(crate) fn without_direction(mut self) -> Self {
        self.direction = None;
        self
    }

    pub fn direction(&self) -> Option<&Direction> {
        self.direction.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn message_id(&self) -> Option<&Value> {
        self.message_id.as_ref()
    }

    pub fn timestamp(&self) -> Option<&Value> {
        self.timestamp.as_ref()
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Message::default();
        };

        let direction = match fields.remove("direction") {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(Direction::from(raw)),
            Some(other) => Some(Direction::Unrecognized(other.to_string())),
        };
        let text = match fields.remove("text") {
            Some(Value::String(text)) => Some(text),
            _ => None,
        };

        Self {
            direction,
            text,
            message_id: fields.remove("message_id").filter(|v| !v.is_null()),
            timestamp: fields.remove("timestamp").filter(|v| !v.is_null()),
        }
    }
}

/// A fully-populated message that precedes a client run.
///
/// This is the `chat_history` entry shape: `message_id` and `timestamp` are
/// serialized as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMessage {
    #[serde(default)]
    pub message_id: Option<Value>,
    pub direction: Direction,
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl ContextMessage {
    /// Creates a context entry without identifier or timestamp.
    pub fn new(direction: impl Into<Direction>, text: impl Into<String>) -> Self {
        Self {
            message_id: None,
            direction: direction.into(),
            text: text.into(),
            timestamp: None,
        }
    }
}
