//! HTTP adapter for the consultant endpoints.
//!
//! Reply generation, feedback-driven and manual prompt improvement, and
//! bulk training from exported conversations.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{consultant_router, training_router};
