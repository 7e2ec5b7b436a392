//! # cinerag-core
//!
//! Foundation crate for the cinerag retrieval pipeline.
//! Defines all types, traits, errors, config, constants, and the shared
//! retry policy. Every other crate in the workspace depends on this.

pub mod confidence;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod retry;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use confidence::Confidence;
pub use config::PipelineConfig;
pub use errors::{CineError, CineResult};
pub use models::{AnalyzedQuery, ContextItem, ContextSource, Entity, EntityKind, Relation};
