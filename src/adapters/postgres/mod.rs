//! PostgreSQL adapters - Database implementations of the store ports.
//!
//! - `PostgresPromptStore` - Versioned prompts with per-slot advisory locking
//! - `PostgresTrainingExampleStore` - Append-only training example log
//!
//! Schema lives in the crate's `migrations/` directory.

mod prompt_store;
mod training_example_store;

pub use prompt_store::PostgresPromptStore;
pub use training_example_store::PostgresTrainingExampleStore;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
