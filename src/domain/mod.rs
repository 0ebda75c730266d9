//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `conversation` - Directional transcripts and the training-example segmenter
//! - `prompt` - Prompt slots, versions, base prompts and model request templates

pub mod conversation;
pub mod foundation;
pub mod prompt;
