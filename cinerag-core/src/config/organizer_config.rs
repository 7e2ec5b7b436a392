use serde::{Deserialize, Serialize};

use super::defaults;

/// Where high-relevance items land in the final sequence. Mitigates the
/// generative model's tendency to attend most to the beginning and end
/// of long contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStrategy {
    /// Rely on the relevance sort; no repositioning.
    ImportantFirst,
    /// Alternate placement from the front and the back so both ends of
    /// the sequence hold high-relevance items.
    ImportantEdges,
    /// First 30% + last 30% at the edges, middle 40% in between.
    Sandwich,
}

/// Context organizer configuration. Each stage toggles independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizerConfig {
    pub enable_pruning: bool,
    pub enable_reranking: bool,
    pub enable_augmentation: bool,
    /// Hard cap on the organized context list.
    pub max_contexts: usize,
    /// Pairwise token-Jaccard similarity above which a context is
    /// considered a near-duplicate.
    pub diversity_threshold: f64,
    /// Graph items farther than this many hops are dropped.
    pub max_hop_distance: u32,
    pub position_strategy: PositionStrategy,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            enable_pruning: true,
            enable_reranking: true,
            enable_augmentation: true,
            max_contexts: defaults::DEFAULT_MAX_CONTEXTS,
            diversity_threshold: defaults::DEFAULT_DIVERSITY_THRESHOLD,
            max_hop_distance: defaults::DEFAULT_MAX_HOP_DISTANCE,
            position_strategy: PositionStrategy::ImportantFirst,
        }
    }
}
