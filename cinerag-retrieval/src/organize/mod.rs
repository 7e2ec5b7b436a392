//! Context organization: pruning, reranking, augmentation.
//!
//! Each stage toggles independently; the output is capped after all
//! stages have run.

use std::collections::HashSet;

use tracing::debug;

use cinerag_core::config::OrganizerConfig;
use cinerag_core::models::{ContextItem, RetrievalOutcome};

pub mod augment;
pub mod prune;
pub mod rerank;

/// Lowercased token set, punctuation stripped.
pub(crate) fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Token-Jaccard similarity: |A∩B| / |A∪B|. Empty union scores zero.
pub(crate) fn token_jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Refines a fused context list for the generative model's attention
/// pattern. Stateless apart from its config.
pub struct ContextOrganizer {
    config: OrganizerConfig,
}

impl ContextOrganizer {
    pub fn new(config: OrganizerConfig) -> Self {
        Self { config }
    }

    pub fn organize(
        &self,
        mut contexts: Vec<ContextItem>,
        query: &str,
        metadata: Option<&RetrievalOutcome>,
    ) -> Vec<ContextItem> {
        let before = contexts.len();

        if self.config.enable_pruning {
            contexts = prune::semantic(contexts, query, self.config.max_contexts);
            contexts = prune::structural(contexts, self.config.max_hop_distance);
            contexts = prune::diversity(contexts, self.config.diversity_threshold);
        }
        if self.config.enable_reranking {
            contexts = rerank::rerank(contexts, query, self.config.position_strategy);
        }
        if self.config.enable_augmentation {
            contexts = augment::augment(contexts, query, metadata);
        }

        contexts.truncate(self.config.max_contexts);
        debug!(before, after = contexts.len(), "contexts organized");
        contexts
    }
}
