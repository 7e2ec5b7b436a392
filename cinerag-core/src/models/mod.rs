//! Data model for the pipeline. All types are plain serde-serializable
//! values; nothing here talks to a collaborator.

mod context;
mod degradation;
mod query;
mod routing;
mod stats;

pub use context::{
    CatalogItem, ContextItem, ContextSource, GraphEdge, GraphNeighbor, GraphNode, GraphRelation,
    LinkedEntity, NodeKind, RetrievalOutcome, VectorHit,
};
pub use degradation::DegradationEvent;
pub use query::{
    AnalyzedQuery, Entity, EntityKind, QueryEdge, QueryNode, Relation, RelationKind,
    StructuredQuery,
};
pub use routing::{AnswerMethod, ChatRole, ChatTurn, QueryCategory, RetrievalHints, RouteKind, RoutingDecision};
pub use stats::{PipelineStats, UsageStats};
