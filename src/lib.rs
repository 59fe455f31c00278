//! Corn leaf disease diagnosis backed by a hosted vision model
//!
//! An uploaded leaf photo is base64-encoded, sent to Gemini with a fixed
//! botanist prompt and a strict output schema, and the structured answer is
//! validated into a typed diagnosis or one of three error tiers.

pub mod ai;
pub mod app;
pub mod diagnosis;
pub mod encoder;
pub mod error;
pub mod models;
pub mod prompts;
pub mod report;

pub use error::{Error, Result};
