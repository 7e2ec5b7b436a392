/// Query analysis errors.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("query too short: {len} chars, minimum {min}")]
    TooShort { len: usize, min: usize },

    #[error("query too long: {len} chars, maximum {max}")]
    TooLong { len: usize, max: usize },
}

impl AnalysisError {
    /// A short, user-presentable rejection message.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::InvalidQuery { .. } => {
                "Your question could not be processed. Please rephrase it.".to_string()
            }
            AnalysisError::TooShort { min, .. } => format!(
                "Your question is too short. Please use at least {min} characters."
            ),
            AnalysisError::TooLong { max, .. } => format!(
                "Your question is too long. Please keep it under {max} characters."
            ),
        }
    }
}
