//! Named prompt locations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A named, independently versioned prompt location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptSlot {
    /// Instructions used to generate consultant replies.
    System,
    /// Instructions used to rewrite the system prompt.
    Editor,
}

impl PromptSlot {
    pub const ALL: [PromptSlot; 2] = [PromptSlot::System, PromptSlot::Editor];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptSlot::System => "system",
            PromptSlot::Editor => "editor",
        }
    }
}

impl fmt::Display for PromptSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(PromptSlot::System),
            "editor" => Ok(PromptSlot::Editor),
            _ => Err(ValidationError::invalid_format(
                "slot",
                "expected 'system' or 'editor'",
            )),
        }
    }
}
