/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("no results survived relevance filtering")]
    Empty,

    #[error("vector search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("graph context unavailable: {reason}")]
    EnrichmentDegraded { reason: String },
}
