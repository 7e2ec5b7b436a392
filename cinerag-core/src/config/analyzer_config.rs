use serde::{Deserialize, Serialize};

use super::defaults;

/// Query analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Bound on the FIFO result cache.
    pub cache_capacity: usize,
    /// Whether the model-based entity extraction fallback is consulted
    /// when rule-based extraction finds fewer than two entities.
    pub model_extraction: bool,
    /// Whether complex queries are decomposed into sub-queries.
    pub decomposition: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            cache_capacity: defaults::DEFAULT_CACHE_CAPACITY,
            model_extraction: true,
            decomposition: true,
        }
    }
}
