use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a context item came from. Drives source-priority reranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    Vector,
    EntityLinked,
    Graph,
    Other,
}

impl ContextSource {
    /// Fixed priority: lower sorts earlier.
    pub fn priority(self) -> u8 {
        match self {
            ContextSource::Vector => 0,
            ContextSource::EntityLinked => 1,
            ContextSource::Graph => 2,
            ContextSource::Other => 3,
        }
    }

    /// Bracket label used when rendering context into a prompt.
    pub fn label(self) -> &'static str {
        match self {
            ContextSource::Vector => "[Vector Match]",
            ContextSource::EntityLinked => "[Entity Linked]",
            ContextSource::Graph => "[Graph]",
            ContextSource::Other => "[Context]",
        }
    }
}

/// One unit of grounding context. Order within a list is meaningful: the
/// generative model attends most to the start and end of long contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextItem {
    pub text: String,
    pub source: ContextSource,
    pub relevance: f64,
    /// Hop distance for graph-sourced items.
    pub hop: Option<u32>,
}

impl ContextItem {
    pub fn new(text: impl Into<String>, source: ContextSource) -> Self {
        Self {
            text: text.into(),
            source,
            relevance: 0.0,
            hop: None,
        }
    }

    pub fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = relevance;
        self
    }

    pub fn with_hop(mut self, hop: u32) -> Self {
        self.hop = Some(hop);
        self
    }
}

impl fmt::Display for ContextItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source.label(), self.text)
    }
}

/// A catalog entry carried in a vector-hit payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    pub title: String,
    pub year: Option<u32>,
    pub overview: String,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub cast: Vec<String>,
    pub keywords: Vec<String>,
}

/// One nearest-neighbor hit from the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    /// Cosine similarity to the query vector.
    pub score: f64,
    pub payload: CatalogItem,
}

/// Node label in the catalog graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Movie,
    Person,
    Genre,
    Other,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Movie => "Movie",
            NodeKind::Person => "Person",
            NodeKind::Genre => "Genre",
            NodeKind::Other => "Node",
        }
    }
}

/// A node returned by a name lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
}

/// A query entity resolved to a concrete graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedEntity {
    /// The query mention that was linked.
    pub mention: String,
    pub node: GraphNode,
}

/// A neighbor reached by bounded traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNeighbor {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    /// Hops from the nearest seed node.
    pub distance: u32,
}

/// Relationship label between two catalog nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GraphRelation {
    Directed,
    ActedIn,
    BelongsTo,
    SimilarTo,
    Other(String),
}

/// An edge between two nodes in the retrieved node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub relation: GraphRelation,
    pub target: String,
}

impl GraphEdge {
    /// Natural-language rendering through relation-specific templates.
    pub fn verbalize(&self) -> String {
        match &self.relation {
            GraphRelation::Directed => {
                format!("{} directed the movie {}", self.source, self.target)
            }
            GraphRelation::ActedIn => format!("{} acted in {}", self.source, self.target),
            GraphRelation::BelongsTo => {
                format!("{} belongs to genre {}", self.source, self.target)
            }
            GraphRelation::SimilarTo => format!("{} is similar to {}", self.source, self.target),
            GraphRelation::Other(rel) => {
                format!("{} has {} relationship with {}", self.source, rel, self.target)
            }
        }
    }
}

/// What one hybrid retrieval pass produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalOutcome {
    pub contexts: Vec<ContextItem>,
    pub vector_count: usize,
    pub graph_count: usize,
    pub linked_entity_count: usize,
    /// Traversal depth used, in hops.
    pub depth: u32,
}
