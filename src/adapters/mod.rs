//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Gemini and OpenAI-compatible providers, plus a mock
//! - `http` - axum routes
//! - `memory` - In-process stores for development and tests
//! - `postgres` - PostgreSQL stores

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;
