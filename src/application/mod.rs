//! Application layer - Commands, Queries, Handlers, and Services.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Services wrap a single port with domain-aware behaviour; handlers compose
//! services into the operations the HTTP API exposes.

mod error;
pub mod handlers;
pub mod services;

pub use error::AgentError;
pub use handlers::{
    // Reply
    GenerateReplyCommand, GenerateReplyHandler, GenerateReplyResult,
    // Prompt
    GetPromptHistoryHandler, GetPromptHistoryQuery, ImproveFromFeedbackCommand,
    ImproveFromFeedbackHandler, ImproveFromFeedbackResult, ImproveManuallyCommand,
    ImproveManuallyHandler, ImproveManuallyResult, RollbackPromptCommand, RollbackPromptHandler,
    // Training
    ExampleOutcome, ExampleStatus, LoadTrainingDataCommand, LoadTrainingDataHandler,
    LoadTrainingDataResult, ParseConversationsHandler, ParseConversationsQuery,
};
pub use services::{PromptManager, ReplyGenerator};
