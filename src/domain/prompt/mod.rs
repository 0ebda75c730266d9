//! Prompt domain module.
//!
//! The service keeps two independently versioned prompts: the `system`
//! prompt that drives consultant replies, and the `editor` prompt that
//! instructs the model how to rewrite the system prompt. This module holds
//! the slot and version types, the built-in base prompts, and the pure
//! functions that build model requests and unwrap model responses.

mod defaults;
mod slot;
mod templates;
mod version;

pub use defaults::{default_content, BASE_EDITOR_PROMPT, BASE_SYSTEM_PROMPT};
pub use slot::PromptSlot;
pub use templates::{
    extract_prompt, extract_reply, improvement_request, manual_update_request, reply_request,
    FeedbackContext, NO_HISTORY_MARKER,
};
pub use version::PromptVersion;
