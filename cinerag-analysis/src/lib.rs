//! # cinerag-analysis
//!
//! Turns raw question text into a structured, confidence-scored
//! [`AnalyzedQuery`](cinerag_core::models::AnalyzedQuery):
//! validation → cleaning → cache lookup → entity extraction → relation
//! extraction → structuring → decomposition → expansion → rewriting →
//! confidence scoring → cache write.

pub mod cache;
pub mod decompose;
pub mod engine;
pub mod expansion;
pub mod extract;
pub mod rewrite;
pub mod scoring;
pub mod structure;

pub use engine::QueryAnalyzer;
