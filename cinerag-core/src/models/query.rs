use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;

/// Kind of an extracted entity. Type-marker variants record that the query
/// mentions a category keyword ("phim", "đạo diễn", "thể loại") rather
/// than a concrete name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Movie,
    Person,
    Genre,
    Year,
    Unknown,
    MovieMarker,
    PersonMarker,
    GenreMarker,
}

impl EntityKind {
    /// Whether this kind names a concrete thing that can be linked to a
    /// graph node. Markers and years never link.
    pub fn is_linkable(self) -> bool {
        matches!(
            self,
            EntityKind::Movie | EntityKind::Person | EntityKind::Genre | EntityKind::Unknown
        )
    }

    /// Parse a model-emitted type label ("MOVIE", "person", …).
    pub fn parse_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "MOVIE" | "FILM" => EntityKind::Movie,
            "PERSON" | "ACTOR" | "DIRECTOR" => EntityKind::Person,
            "GENRE" => EntityKind::Genre,
            "YEAR" => EntityKind::Year,
            _ => EntityKind::Unknown,
        }
    }
}

/// An entity mention extracted from the query text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
    pub confidence: Confidence,
}

impl Entity {
    pub fn new(text: impl Into<String>, kind: EntityKind, confidence: f64) -> Self {
        Self {
            text: text.into(),
            kind,
            confidence: Confidence::new(confidence),
        }
    }

    /// Deduplication key: (lowercased text, kind).
    pub fn dedup_key(&self) -> (String, EntityKind) {
        (self.text.to_lowercase(), self.kind)
    }
}

/// Relation taxonomy. At most one instance per kind is recorded per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    DirectedBy,
    ActedIn,
    BelongsTo,
    SimilarTo,
    ReleasedIn,
}

impl RelationKind {
    pub const ALL: [RelationKind; 5] = [
        RelationKind::DirectedBy,
        RelationKind::ActedIn,
        RelationKind::BelongsTo,
        RelationKind::SimilarTo,
        RelationKind::ReleasedIn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::DirectedBy => "DIRECTED_BY",
            RelationKind::ActedIn => "ACTED_IN",
            RelationKind::BelongsTo => "BELONGS_TO",
            RelationKind::SimilarTo => "SIMILAR_TO",
            RelationKind::ReleasedIn => "RELEASED_IN",
        }
    }
}

/// A relation detected in the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub confidence: Confidence,
}

/// A node in the structured-query skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryNode {
    pub label: EntityKind,
    pub name: String,
}

/// An edge in the structured-query skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEdge {
    pub kind: RelationKind,
}

/// Node/edge/filter skeleton built from the extracted entities and
/// relations. Documents retrieval intent; it is not executed by the
/// analyzer itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredQuery {
    pub nodes: Vec<QueryNode>,
    pub edges: Vec<QueryEdge>,
    /// Year filter, when a YEAR entity was found.
    pub year: Option<String>,
}

impl StructuredQuery {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.year.is_none()
    }

    /// Render the skeleton as a Cypher-like MATCH statement. Used for
    /// observability and optional direct graph querying.
    pub fn to_match_statement(&self) -> String {
        let mut match_parts = Vec::new();
        let mut where_parts = Vec::new();

        for node in &self.nodes {
            let label = match node.label {
                EntityKind::Movie => "Movie",
                EntityKind::Person => "Person",
                EntityKind::Genre => "Genre",
                _ => "Node",
            };
            match_parts.push(format!("(n:{label})"));
            where_parts.push(format!(
                "toLower(n.name) CONTAINS toLower('{}') OR toLower(n.title) CONTAINS toLower('{}')",
                node.name, node.name
            ));
        }
        for edge in &self.edges {
            match_parts.push(format!("-[:{}]-", edge.kind.as_str()));
        }
        if let Some(year) = &self.year {
            where_parts.push(format!("n.year = {year}"));
        }

        let match_clause = if match_parts.is_empty() {
            "MATCH (m:Movie)".to_string()
        } else {
            format!("MATCH {}(m:Movie)", match_parts.join(""))
        };
        let where_clause = if where_parts.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_parts.join(" OR "))
        };
        let return_clause = "RETURN m.title, m.year, m.overview LIMIT 10";

        [match_clause, where_clause, return_clause.to_string()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The analyzer's output for one user turn. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedQuery {
    pub raw: String,
    pub cleaned: String,
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
    pub structured: StructuredQuery,
    pub sub_queries: Vec<String>,
    pub expanded_terms: Vec<String>,
    pub confidence: Confidence,
    pub rewritten: Option<String>,
    /// blake3 hash of the lowercased cleaned text.
    pub cache_key: String,
    /// Set on results served from the analyzer cache.
    pub cached: bool,
}

impl AnalyzedQuery {
    /// The text to hand to downstream consumers: the rewrite when one was
    /// produced, otherwise the cleaned query.
    pub fn effective_text(&self) -> &str {
        self.rewritten.as_deref().unwrap_or(&self.cleaned)
    }
}
