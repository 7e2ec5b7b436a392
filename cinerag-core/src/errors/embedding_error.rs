use crate::retry::Retryable;

/// Embedding service errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding rate limited: {reason}")]
    RateLimited { reason: String },

    #[error("embedding request failed: {reason}")]
    Transient { reason: String },

    #[error("embedding retries exhausted after {attempts} attempts")]
    Exhausted { attempts: usize },
}

impl Retryable for EmbeddingError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            EmbeddingError::RateLimited { .. } | EmbeddingError::Transient { .. }
        )
    }

    fn is_rate_limited(&self) -> bool {
        matches!(self, EmbeddingError::RateLimited { .. })
    }

    fn exhausted(attempts: usize) -> Self {
        EmbeddingError::Exhausted { attempts }
    }
}
