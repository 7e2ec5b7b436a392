/// Graph store errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("graph query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("graph store unavailable: {reason}")]
    Unavailable { reason: String },
}
