//! Bounded k-hop expansion and relationship listing.

use tracing::{debug, warn};

use cinerag_core::config::RetrievalConfig;
use cinerag_core::models::{GraphEdge, GraphNeighbor};
use cinerag_core::traits::IGraphStore;

/// What one traversal pass produced. Either list may be empty when the
/// graph store degraded.
#[derive(Debug, Default)]
pub struct Traversal {
    pub neighbors: Vec<GraphNeighbor>,
    pub edges: Vec<GraphEdge>,
}

/// Expand from the seed nodes up to `depth` hops, then list relationship
/// edges among the full node set. Graph failures degrade to empty
/// partial results.
pub fn traverse(
    graph: &dyn IGraphStore,
    seed_ids: &[String],
    depth: u32,
    config: &RetrievalConfig,
) -> Traversal {
    if seed_ids.is_empty() {
        return Traversal::default();
    }

    let neighbors = match graph.k_hop_neighbors(seed_ids, depth, config.max_traversal_nodes) {
        Ok(neighbors) => neighbors,
        Err(e) => {
            warn!(error = %e, depth, "k-hop expansion failed");
            return Traversal::default();
        }
    };

    let mut node_ids: Vec<String> = seed_ids.to_vec();
    node_ids.extend(neighbors.iter().map(|n| n.id.clone()));
    let edges = match graph.relationships_between(&node_ids, config.max_relationships) {
        Ok(edges) => edges,
        Err(e) => {
            warn!(error = %e, "relationship listing failed");
            Vec::new()
        }
    };

    debug!(
        seeds = seed_ids.len(),
        neighbors = neighbors.len(),
        edges = edges.len(),
        depth,
        "traversal complete"
    );
    Traversal { neighbors, edges }
}
