//! Error taxonomy for the pipeline.
//!
//! One enum per subsystem, composed into [`CineError`]. Nothing in this
//! taxonomy is allowed to escape the top-level `query()` call; every
//! failure path resolves to an answer string plus a routing decision.

mod analysis_error;
mod embedding_error;
mod generation_error;
mod graph_error;
mod retrieval_error;

pub use analysis_error::AnalysisError;
pub use embedding_error::EmbeddingError;
pub use generation_error::GenerationError;
pub use graph_error::GraphError;
pub use retrieval_error::RetrievalError;

/// Top-level error for the cinerag workspace.
#[derive(Debug, thiserror::Error)]
pub enum CineError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias used across the workspace.
pub type CineResult<T> = Result<T, CineError>;
