use serde::{Deserialize, Serialize};

/// Raw usage counters accumulated across queries. Shared mutable state
/// requires external locking if an instance is shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub queries_processed: u64,
    pub cache_hits: u64,
    pub entities_found: u64,
    pub relations_found: u64,
}

impl UsageStats {
    pub fn snapshot(&self) -> PipelineStats {
        let processed = self.queries_processed;
        let ratio = |num: u64| {
            if processed == 0 {
                0.0
            } else {
                num as f64 / processed as f64
            }
        };
        PipelineStats {
            queries_processed: processed,
            cache_hit_rate: ratio(self.cache_hits),
            avg_entities_per_query: ratio(self.entities_found),
            avg_relations_per_query: ratio(self.relations_found),
        }
    }
}

/// Derived statistics exposed through the public API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub queries_processed: u64,
    /// Fraction of queries served from the analyzer cache, in [0, 1].
    pub cache_hit_rate: f64,
    pub avg_entities_per_query: f64,
    pub avg_relations_per_query: f64,
}
