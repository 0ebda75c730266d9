//! Conversation domain module.
//!
//! Holds the directional transcript model and the segmenter that turns a
//! transcript into (context, client turn, consultant reply) training examples.

mod context;
mod conversation;
mod example;
mod message;
mod segmenter;

pub use context::{format_context, EMPTY_HISTORY_PLACEHOLDER};
pub use conversation::{Conversation, UNIDENTIFIED_CONVERSATION};
pub use example::TrainingExample;
pub use message::{ContextMessage, Direction, Message};
pub use segmenter::{segment, segment_all, SegmentError, SegmentFailure, SegmentedBatch};
