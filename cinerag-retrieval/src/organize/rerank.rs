//! Reranking: relevance sort, source-priority sort, position strategy.

use cinerag_core::config::PositionStrategy;
use cinerag_core::models::ContextItem;

use super::{token_jaccard, token_set};

/// Mild penalty so a long item needs proportionally more overlap to
/// outrank a short one.
fn length_penalty(text: &str) -> f64 {
    (text.chars().count() as f64 / 1000.0).min(0.3)
}

pub fn rerank(
    mut contexts: Vec<ContextItem>,
    query: &str,
    strategy: PositionStrategy,
) -> Vec<ContextItem> {
    let query_tokens = token_set(query);
    for context in &mut contexts {
        context.relevance =
            token_jaccard(&query_tokens, &token_set(&context.text)) - length_penalty(&context.text);
    }
    contexts.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    // Stable, so the relevance order survives within each source tier.
    contexts.sort_by_key(|c| c.source.priority());

    match strategy {
        PositionStrategy::ImportantFirst => contexts,
        PositionStrategy::ImportantEdges => important_edges(contexts),
        PositionStrategy::Sandwich => sandwich(contexts),
    }
}

/// Alternate placement from the front and the back: item 0 opens the
/// sequence, item 1 closes it, so both ends hold high-relevance items.
fn important_edges(contexts: Vec<ContextItem>) -> Vec<ContextItem> {
    let mut front = Vec::with_capacity(contexts.len() / 2 + 1);
    let mut back = Vec::with_capacity(contexts.len() / 2);
    for (i, context) in contexts.into_iter().enumerate() {
        if i % 2 == 0 {
            front.push(context);
        } else {
            back.push(context);
        }
    }
    front.extend(back.into_iter().rev());
    front
}

/// Top 30% at the start, the next 30% at the end, the rest in between.
fn sandwich(contexts: Vec<ContextItem>) -> Vec<ContextItem> {
    let n = contexts.len();
    if n < 3 {
        return contexts;
    }
    let top_n = (n * 3 / 10).max(1);
    let mut iter = contexts.into_iter();
    let head: Vec<ContextItem> = iter.by_ref().take(top_n).collect();
    let tail: Vec<ContextItem> = iter.by_ref().take(top_n).collect();
    let middle: Vec<ContextItem> = iter.collect();

    let mut out = head;
    out.extend(middle);
    out.extend(tail);
    out
}
