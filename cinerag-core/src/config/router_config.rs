use serde::{Deserialize, Serialize};

use super::defaults;

/// Which retrieval strategy the router runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMode {
    /// Vector-only retrieval, no graph work.
    Basic,
    /// Full hybrid retrieval with entity linking and traversal.
    Advanced,
    /// Hybrid retrieval plus general-knowledge synthesis.
    Augmented,
}

/// Answer router configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub mode: RetrievalMode,
    /// Queries analyzed below this confidence skip retrieval entirely.
    pub confidence_threshold: f64,
    /// Minimum vector-hit score in basic mode. Embedding score
    /// distributions differ across configurations, hence per-mode knobs.
    pub relevance_threshold_basic: f64,
    /// Minimum vector-hit score in advanced/augmented mode.
    pub relevance_threshold_advanced: f64,
    /// Whether the context organizer runs before generation.
    pub enable_organizer: bool,
    /// Recent chat turns included in the grounded prompt.
    pub max_history_turns: usize,
    /// Per-turn truncation for included history.
    pub history_truncate_chars: usize,
}

impl RouterConfig {
    /// The vector relevance threshold for the configured mode.
    pub fn relevance_threshold(&self) -> f64 {
        match self.mode {
            RetrievalMode::Basic => self.relevance_threshold_basic,
            RetrievalMode::Advanced | RetrievalMode::Augmented => {
                self.relevance_threshold_advanced
            }
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            mode: RetrievalMode::Advanced,
            confidence_threshold: defaults::DEFAULT_CONFIDENCE_THRESHOLD,
            relevance_threshold_basic: defaults::DEFAULT_RELEVANCE_THRESHOLD_BASIC,
            relevance_threshold_advanced: defaults::DEFAULT_RELEVANCE_THRESHOLD_ADVANCED,
            enable_organizer: true,
            max_history_turns: defaults::DEFAULT_MAX_HISTORY_TURNS,
            history_truncate_chars: defaults::DEFAULT_HISTORY_TRUNCATE_CHARS,
        }
    }
}
