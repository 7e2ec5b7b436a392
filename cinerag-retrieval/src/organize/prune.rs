//! Pruning passes: semantic top-K, hop-distance cut, diversity filter.

use cinerag_core::models::ContextItem;

use super::{token_jaccard, token_set};

/// When over the cap, keep the items with the highest token overlap with
/// the query. Original order is preserved among survivors.
pub fn semantic(contexts: Vec<ContextItem>, query: &str, max_contexts: usize) -> Vec<ContextItem> {
    if contexts.len() <= max_contexts {
        return contexts;
    }
    let query_tokens = token_set(query);
    let mut scored: Vec<(usize, f64)> = contexts
        .iter()
        .enumerate()
        .map(|(i, c)| (i, token_jaccard(&query_tokens, &token_set(&c.text))))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let keep: std::collections::HashSet<usize> =
        scored.iter().take(max_contexts).map(|(i, _)| *i).collect();
    contexts
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep.contains(i))
        .map(|(_, c)| c)
        .collect()
}

/// Drop graph items whose hop distance exceeds the bound. Items without
/// a hop distance are untouched.
pub fn structural(contexts: Vec<ContextItem>, max_hop_distance: u32) -> Vec<ContextItem> {
    contexts
        .into_iter()
        .filter(|c| c.hop.map_or(true, |hop| hop <= max_hop_distance))
        .collect()
}

/// Greedy near-duplicate filter. The first item is always kept; each
/// later item survives only if it is dissimilar to everything already
/// kept.
pub fn diversity(contexts: Vec<ContextItem>, threshold: f64) -> Vec<ContextItem> {
    let mut kept: Vec<ContextItem> = Vec::new();
    let mut kept_tokens: Vec<std::collections::HashSet<String>> = Vec::new();

    for context in contexts {
        let tokens = token_set(&context.text);
        let is_first = kept.is_empty();
        let distinct = kept_tokens
            .iter()
            .all(|existing| token_jaccard(existing, &tokens) < threshold);
        if is_first || distinct {
            kept.push(context);
            kept_tokens.push(tokens);
        }
    }
    kept
}
