//! The hybrid retriever.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use cinerag_analysis::expansion;
use cinerag_core::config::RetrievalConfig;
use cinerag_core::errors::RetrievalError;
use cinerag_core::models::{
    AnalyzedQuery, ContextItem, ContextSource, DegradationEvent, RetrievalHints,
    RetrievalOutcome, VectorHit,
};
use cinerag_core::retry::RetryPolicy;
use cinerag_core::traits::{EmbeddingTask, IEmbeddingService, IGraphStore, IVectorStore};

use crate::{depth, fusion, linking, traversal};

/// One hybrid retrieval pass plus the node identifiers it touched, kept
/// for the later enrichment step.
#[derive(Debug, Default)]
pub struct Retrieved {
    pub outcome: RetrievalOutcome,
    pub node_ids: Vec<String>,
    pub degradations: Vec<DegradationEvent>,
}

/// Combines vector similarity search with entity linking and bounded
/// graph traversal. Every sub-call failure degrades to an empty partial
/// result; retrieval itself never fails.
pub struct HybridRetriever {
    embedding: Arc<dyn IEmbeddingService>,
    vector_store: Arc<dyn IVectorStore>,
    graph_store: Arc<dyn IGraphStore>,
    config: RetrievalConfig,
    retry: RetryPolicy,
}

impl HybridRetriever {
    pub fn new(
        embedding: Arc<dyn IEmbeddingService>,
        vector_store: Arc<dyn IVectorStore>,
        graph_store: Arc<dyn IGraphStore>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            embedding,
            vector_store,
            graph_store,
            config,
            retry: RetryPolicy::embedding(),
        }
    }

    /// Replace the embedding retry policy. Tests zero the backoff.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Full hybrid pass: vector search over the enhanced query text,
    /// entity linking, k-hop traversal, then fusion.
    pub fn retrieve(&self, analyzed: &AnalyzedQuery, hints: RetrievalHints) -> Retrieved {
        let depth = depth::predict(analyzed, hints);
        let mut degradations = Vec::new();

        let enhanced = expansion::enhance_search_query(
            analyzed.effective_text(),
            &analyzed.entities,
            &analyzed.expanded_terms,
        );
        let hits = self.vector_hits(&enhanced, self.config.top_k_vector, &mut degradations);

        let linked = linking::link_entities(self.graph_store.as_ref(), &analyzed.entities);
        let seed_ids: Vec<String> = linked.iter().map(|l| l.node.id.clone()).collect();
        let traversal =
            traversal::traverse(self.graph_store.as_ref(), &seed_ids, depth, &self.config);

        let contexts = fusion::fuse(&hits, &linked, &traversal.neighbors);
        let mut node_ids = seed_ids;
        node_ids.extend(traversal.neighbors.iter().map(|n| n.id.clone()));
        let mut seen = HashSet::new();
        node_ids.retain(|id| seen.insert(id.clone()));

        info!(
            vector = hits.len(),
            linked = linked.len(),
            graph = traversal.neighbors.len(),
            depth,
            "hybrid retrieval complete"
        );
        Retrieved {
            outcome: RetrievalOutcome {
                contexts,
                vector_count: hits.len(),
                graph_count: traversal.neighbors.len(),
                linked_entity_count: linked.len(),
                depth,
            },
            node_ids,
            degradations,
        }
    }

    /// Vector-only pass over the effective query text. The caller formats
    /// the surviving catalog payloads itself.
    pub fn retrieve_basic(
        &self,
        analyzed: &AnalyzedQuery,
    ) -> (Vec<VectorHit>, Vec<DegradationEvent>) {
        let mut degradations = Vec::new();
        let hits = self.vector_hits(
            analyzed.effective_text(),
            self.config.top_k_basic,
            &mut degradations,
        );
        (hits, degradations)
    }

    /// Relationship edges among the retrieved node set, verbalized into
    /// graph-tagged context items. May legitimately be empty.
    pub fn enrich(&self, node_ids: &[String]) -> Result<Vec<ContextItem>, RetrievalError> {
        if node_ids.is_empty() {
            return Ok(Vec::new());
        }
        let edges = self
            .graph_store
            .relationships_between(node_ids, self.config.max_relationships)
            .map_err(|e| RetrievalError::EnrichmentDegraded {
                reason: e.to_string(),
            })?;
        Ok(edges
            .iter()
            .map(|edge| ContextItem::new(edge.verbalize(), ContextSource::Graph))
            .collect())
    }

    fn vector_hits(
        &self,
        text: &str,
        top_k: usize,
        degradations: &mut Vec<DegradationEvent>,
    ) -> Vec<VectorHit> {
        let vector = match self.retry.run("embedding", || {
            self.embedding.embed(text, EmbeddingTask::RetrievalQuery)
        }) {
            Ok(vector) => vector,
            Err(e) => {
                warn!(error = %e, "embedding failed, skipping vector search");
                degradations.push(DegradationEvent::now(
                    "embedding",
                    e.to_string(),
                    "empty vector results",
                ));
                return Vec::new();
            }
        };

        match self.vector_store.search(&vector, top_k) {
            Ok(hits) => {
                debug!(hits = hits.len(), top_k, "vector search complete");
                hits
            }
            Err(e) => {
                warn!(error = %e, "vector search failed");
                degradations.push(DegradationEvent::now(
                    "vector_store",
                    e.to_string(),
                    "empty vector results",
                ));
                Vec::new()
            }
        }
    }
}
