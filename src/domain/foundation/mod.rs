//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error vocabulary shared by the
//! conversation and prompt modules.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{PromptVersionId, TrainingExampleId};
pub use timestamp::Timestamp;
