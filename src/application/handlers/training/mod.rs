//! Training data handlers: segmentation and batch learning.

mod load_training_data;
mod parse_conversations;

pub use load_training_data::{
    ExampleOutcome, ExampleStatus, LoadTrainingDataCommand, LoadTrainingDataHandler,
    LoadTrainingDataResult,
};
pub use parse_conversations::{ParseConversationsHandler, ParseConversationsQuery};
