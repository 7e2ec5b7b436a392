use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid retriever configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Nearest neighbors requested in the hybrid path.
    pub top_k_vector: usize,
    /// Nearest neighbors requested in the vector-only path.
    pub top_k_basic: usize,
    /// Node cap for k-hop traversal.
    pub max_traversal_nodes: usize,
    /// Edge cap for relationship listing.
    pub max_relationships: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k_vector: defaults::DEFAULT_TOP_K_VECTOR,
            top_k_basic: defaults::DEFAULT_TOP_K_BASIC,
            max_traversal_nodes: defaults::DEFAULT_MAX_TRAVERSAL_NODES,
            max_relationships: defaults::DEFAULT_MAX_RELATIONSHIPS,
        }
    }
}
