//! # cinerag-retrieval
//!
//! Hybrid retrieval over a vector store and a catalog graph: traversal
//! depth prediction, entity linking, bounded k-hop expansion, vector
//! similarity search, and fusion into one tagged context list. The
//! `organize` module refines that list (pruning, reranking,
//! augmentation) before it reaches the generative model.

pub mod depth;
pub mod engine;
pub mod fusion;
pub mod linking;
pub mod organize;
pub mod traversal;

pub use engine::{HybridRetriever, Retrieved};
pub use organize::ContextOrganizer;
