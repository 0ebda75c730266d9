//! Application services shared by several handlers.

mod prompt_manager;
mod reply_generator;

pub use prompt_manager::PromptManager;
pub use reply_generator::ReplyGenerator;
