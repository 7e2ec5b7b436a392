use crate::errors::RetrievalError;
use crate::models::VectorHit;

/// Vector similarity store collaborator. Results are cosine-ranked,
/// best first.
pub trait IVectorStore: Send + Sync {
    fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorHit>, RetrievalError>;
}
