use crate::errors::EmbeddingError;

/// Task hint passed through to the embedding model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingTask {
    RetrievalQuery,
    RetrievalDocument,
}

/// Embedding service collaborator. One call per text; blocking.
pub trait IEmbeddingService: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str, task: EmbeddingTask) -> Result<Vec<f32>, EmbeddingError>;

    /// The dimensionality of embeddings produced by this service.
    fn dimensions(&self) -> usize;
}
