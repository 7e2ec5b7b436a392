//! Fuses heterogeneous retrieval results into one tagged context list.
//!
//! Fixed tag-priority order before any reranking: vector hits, then
//! linked entities, then graph neighbors.

use cinerag_core::constants::OVERVIEW_TRUNCATE_CHARS;
use cinerag_core::models::{
    CatalogItem, ContextItem, ContextSource, GraphNeighbor, LinkedEntity, VectorHit,
};

pub const MAX_VECTOR_CONTEXTS: usize = 5;
pub const MAX_LINKED_CONTEXTS: usize = 3;
pub const MAX_GRAPH_CONTEXTS: usize = 5;

pub fn fuse(
    hits: &[VectorHit],
    linked: &[LinkedEntity],
    neighbors: &[GraphNeighbor],
) -> Vec<ContextItem> {
    let mut contexts = Vec::new();

    for hit in hits.iter().take(MAX_VECTOR_CONTEXTS) {
        let overview = truncate(&hit.payload.overview, OVERVIEW_TRUNCATE_CHARS);
        let text = if overview.is_empty() {
            hit.payload.title.clone()
        } else {
            format!("{}: {}", hit.payload.title, overview)
        };
        contexts.push(
            ContextItem::new(text, ContextSource::Vector).with_relevance(hit.score),
        );
    }

    for entity in linked.iter().take(MAX_LINKED_CONTEXTS) {
        contexts.push(ContextItem::new(
            entity.node.name.clone(),
            ContextSource::EntityLinked,
        ));
    }

    for neighbor in neighbors.iter().take(MAX_GRAPH_CONTEXTS) {
        contexts.push(
            ContextItem::new(
                format!(
                    "{}: {} ({} hops)",
                    neighbor.kind.as_str(),
                    neighbor.name,
                    neighbor.distance
                ),
                ContextSource::Graph,
            )
            .with_hop(neighbor.distance),
        );
    }

    contexts
}

/// Formatted catalog entry used by the vector-only retrieval path.
pub fn catalog_entry(item: &CatalogItem) -> String {
    let mut lines = Vec::new();
    match item.year {
        Some(year) => lines.push(format!("Title: {} ({year})", item.title)),
        None => lines.push(format!("Title: {}", item.title)),
    }
    if !item.directors.is_empty() {
        lines.push(format!("Director: {}", item.directors.join(", ")));
    }
    if !item.cast.is_empty() {
        lines.push(format!("Cast: {}", item.cast.join(", ")));
    }
    if !item.genres.is_empty() {
        lines.push(format!("Genres: {}", item.genres.join(", ")));
    }
    if !item.keywords.is_empty() {
        lines.push(format!("Keywords: {}", item.keywords.join(", ")));
    }
    if !item.overview.is_empty() {
        lines.push(format!(
            "Overview: {}",
            truncate(&item.overview, OVERVIEW_TRUNCATE_CHARS)
        ));
    }
    lines.join("\n")
}

/// Truncate on a char boundary, appending an ellipsis when shortened.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinerag_core::models::{GraphNode, NodeKind};

    fn hit(title: &str, score: f64) -> VectorHit {
        VectorHit {
            id: title.to_string(),
            score,
            payload: CatalogItem {
                title: title.to_string(),
                overview: "A mind-bending story.".to_string(),
                ..CatalogItem::default()
            },
        }
    }

    fn linked(name: &str) -> LinkedEntity {
        LinkedEntity {
            mention: name.to_string(),
            node: GraphNode {
                id: name.to_string(),
                name: name.to_string(),
                kind: NodeKind::Person,
            },
        }
    }

    fn neighbor(name: &str, distance: u32) -> GraphNeighbor {
        GraphNeighbor {
            id: name.to_string(),
            name: name.to_string(),
            kind: NodeKind::Movie,
            distance,
        }
    }

    #[test]
    fn tag_priority_order_is_fixed() {
        let contexts = fuse(
            &[hit("Inception", 0.9)],
            &[linked("Christopher Nolan")],
            &[neighbor("Interstellar", 1)],
        );
        let sources: Vec<_> = contexts.iter().map(|c| c.source).collect();
        assert_eq!(
            sources,
            vec![
                ContextSource::Vector,
                ContextSource::EntityLinked,
                ContextSource::Graph
            ]
        );
    }

    #[test]
    fn per_source_caps_hold() {
        let hits: Vec<_> = (0..8).map(|i| hit(&format!("m{i}"), 0.5)).collect();
        let links: Vec<_> = (0..6).map(|i| linked(&format!("p{i}"))).collect();
        let neighbors: Vec<_> = (0..9).map(|i| neighbor(&format!("n{i}"), 1)).collect();
        let contexts = fuse(&hits, &links, &neighbors);
        assert_eq!(
            contexts.len(),
            MAX_VECTOR_CONTEXTS + MAX_LINKED_CONTEXTS + MAX_GRAPH_CONTEXTS
        );
    }

    #[test]
    fn long_overview_is_truncated() {
        let mut h = hit("Epic", 0.9);
        h.payload.overview = "x".repeat(500);
        let contexts = fuse(&[h], &[], &[]);
        assert!(contexts[0].text.chars().count() < 500);
        assert!(contexts[0].text.ends_with("..."));
    }

    #[test]
    fn graph_items_carry_hop_distance() {
        let contexts = fuse(&[], &[], &[neighbor("Tenet", 2)]);
        assert_eq!(contexts[0].hop, Some(2));
        assert_eq!(contexts[0].text, "Movie: Tenet (2 hops)");
    }

    #[test]
    fn catalog_entry_includes_known_fields_only() {
        let entry = catalog_entry(&CatalogItem {
            title: "Inception".into(),
            year: Some(2010),
            overview: "Dreams within dreams.".into(),
            genres: vec!["Sci-Fi".into()],
            directors: vec!["Christopher Nolan".into()],
            cast: vec![],
            keywords: vec![],
        });
        assert!(entry.contains("Title: Inception (2010)"));
        assert!(entry.contains("Director: Christopher Nolan"));
        assert!(!entry.contains("Cast:"));
    }
}
