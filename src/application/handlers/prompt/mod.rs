//! Prompt command and query handlers.

mod improve_from_feedback;
mod improve_manually;
mod prompt_history;

pub use improve_from_feedback::{
    ImproveFromFeedbackCommand, ImproveFromFeedbackHandler, ImproveFromFeedbackResult,
};
pub use improve_manually::{ImproveManuallyCommand, ImproveManuallyHandler, ImproveManuallyResult};
pub use prompt_history::{
    GetPromptHistoryHandler, GetPromptHistoryQuery, RollbackPromptCommand, RollbackPromptHandler,
    MAX_HISTORY_LIMIT,
};
