use crate::retry::Retryable;

/// Generation service errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation rate limited: {reason}")]
    RateLimited { reason: String },

    #[error("generation request failed: {reason}")]
    Transient { reason: String },

    #[error("content blocked by safety filter: {reason}")]
    ContentBlocked { reason: String },

    #[error("generation retries exhausted after {attempts} attempts")]
    Exhausted { attempts: usize },
}

impl Retryable for GenerationError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. } | GenerationError::Transient { .. }
        )
    }

    fn is_rate_limited(&self) -> bool {
        matches!(self, GenerationError::RateLimited { .. })
    }

    fn exhausted(attempts: usize) -> Self {
        GenerationError::Exhausted { attempts }
    }
}
