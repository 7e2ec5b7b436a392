use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Sampling configuration for one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl SamplingOptions {
    /// Low-temperature, high-determinism mode for grounded answers.
    pub fn grounded() -> Self {
        Self {
            temperature: 0.2,
            max_output_tokens: 1024,
        }
    }

    /// Default sampling for general-knowledge answers.
    pub fn general() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

/// Safety filtering mode for one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyMode {
    Standard,
    Permissive,
}

/// Generation service collaborator. Blocking; content rejection surfaces
/// as `GenerationError::ContentBlocked`.
pub trait IGenerationService: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        sampling: &SamplingOptions,
        safety: SafetyMode,
    ) -> Result<String, GenerationError>;
}
