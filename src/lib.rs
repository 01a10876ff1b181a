//! Illustrated story generator - turns a topic into an AI image and a short story
//!
//! Asks a hosted AI service for a story outline, renders an image for it,
//! writes a ~100 word story combining both, and presents the result. Remote
//! calls are wrapped in a bounded linear-backoff retry for rate-limit handling.

pub mod ai;
pub mod app;
pub mod display;
pub mod error;
pub mod models;
pub mod prompts;
pub mod retry;

pub use error::{Error, Result};
