use crate::errors::GraphError;
use crate::models::{GraphEdge, GraphNeighbor, GraphNode};

/// Which node index a name-contains lookup targets. Replaces string-keyed
/// query-template selection; every dispatch site matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLookup {
    MovieTitle,
    PersonName,
    GenreName,
    /// Union over all labels, for mentions of unknown type.
    Any,
}

/// Graph store collaborator. Every traversal operation is hop- and
/// count-bounded; unbounded expansion is not expressible here.
pub trait IGraphStore: Send + Sync {
    /// Case-insensitive name-contains lookup.
    fn find_nodes(
        &self,
        lookup: NodeLookup,
        name: &str,
        limit: usize,
    ) -> Result<Vec<GraphNode>, GraphError>;

    /// Neighbors within `max_hops` of any seed, ordered by ascending hop
    /// distance, capped at `max_nodes`.
    fn k_hop_neighbors(
        &self,
        seed_ids: &[String],
        max_hops: u32,
        max_nodes: usize,
    ) -> Result<Vec<GraphNeighbor>, GraphError>;

    /// Relationship edges among the given node set, capped at `limit`.
    fn relationships_between(
        &self,
        node_ids: &[String],
        limit: usize,
    ) -> Result<Vec<GraphEdge>, GraphError>;
}
