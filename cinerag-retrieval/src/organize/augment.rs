//! Augmentation: synthetic framing items prepended to the context list.

use cinerag_core::models::{ContextItem, ContextSource, RetrievalOutcome};

/// Prepend, in order: a retrieval-metadata line (when metadata is
/// supplied), a restatement of the user's question, and a one-line
/// summary of what was matched.
pub fn augment(
    contexts: Vec<ContextItem>,
    query: &str,
    metadata: Option<&RetrievalOutcome>,
) -> Vec<ContextItem> {
    let mut out = Vec::with_capacity(contexts.len() + 3);

    if let Some(outcome) = metadata {
        out.push(ContextItem::new(
            format!(
                "Retrieval: depth {}, {} semantic matches, {} graph nodes, {} linked entities",
                outcome.depth,
                outcome.vector_count,
                outcome.graph_count,
                outcome.linked_entity_count
            ),
            ContextSource::Other,
        ));
    }

    out.push(ContextItem::new(
        format!("User question: {query}"),
        ContextSource::Other,
    ));

    // Vector hits are catalog movies by construction; graph and linked
    // items are classified by their node-kind prefix.
    let movie_like = contexts
        .iter()
        .filter(|c| c.source == ContextSource::Vector || c.text.starts_with("Movie:"))
        .count();
    let person_like = contexts
        .iter()
        .filter(|c| c.text.starts_with("Person:"))
        .count();
    out.push(ContextItem::new(
        format!("Summary: matched {movie_like} movie items and {person_like} person items"),
        ContextSource::Other,
    ));

    out.extend(contexts);
    out
}
