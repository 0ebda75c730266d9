//! HTTP adapter for prompt version history and rollback.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::prompts_router;
