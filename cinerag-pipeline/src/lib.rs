//! # cinerag-pipeline
//!
//! The top of the stack: [`RagPipeline`] turns one question plus recent
//! chat history into one answer string, routing between grounded
//! generation, general-knowledge fallback, and augmented synthesis. No
//! error ever escapes [`RagPipeline::query`]; every failure path resolves
//! to a natural-language message and a recorded routing decision.

pub mod prompts;
pub mod router;
pub mod validate;

pub use router::RagPipeline;
