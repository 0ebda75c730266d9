//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Hosted LLM completions
//! - `PromptStore` - Append-only, versioned prompt slots
//! - `TrainingExampleStore` - Append-only log of training examples

mod ai_provider;
mod prompt_store;
mod store_error;
mod training_example_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestPurpose, TokenUsage,
};
pub use prompt_store::{PromptStore, DEFAULT_HISTORY_LIMIT};
pub use store_error::StoreError;
pub use training_example_store::{TrainingExampleStore, TrainingRecord};
