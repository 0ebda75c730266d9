//! In-memory adapters for the store ports.
//!
//! Used when no database is configured, and throughout the test suite.

mod prompt_store;
mod training_example_store;

pub use prompt_store::InMemoryPromptStore;
pub use training_example_store::InMemoryTrainingExampleStore;
