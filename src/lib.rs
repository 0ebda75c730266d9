//! Consultant AI - Visa consultant reply assistant
//!
//! Segments exported client conversations into training examples, predicts
//! consultant replies with an LLM, and improves its own system prompt from
//! the difference between predicted and real replies.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
