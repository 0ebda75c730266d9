//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod prompt;
pub mod reply;
pub mod training;

pub use prompt::{
    GetPromptHistoryHandler, GetPromptHistoryQuery, ImproveFromFeedbackCommand,
    ImproveFromFeedbackHandler, ImproveFromFeedbackResult, ImproveManuallyCommand,
    ImproveManuallyHandler, ImproveManuallyResult, RollbackPromptCommand, RollbackPromptHandler,
    MAX_HISTORY_LIMIT,
};
pub use reply::{GenerateReplyCommand, GenerateReplyHandler, GenerateReplyResult};
pub use training::{
    ExampleOutcome, ExampleStatus, LoadTrainingDataCommand, LoadTrainingDataHandler,
    LoadTrainingDataResult, ParseConversationsHandler, ParseConversationsQuery,
};
