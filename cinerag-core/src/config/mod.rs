//! Pipeline configuration, loadable from TOML. Every struct is
//! `#[serde(default)]` so partial files work.

pub mod defaults;

mod analyzer_config;
mod organizer_config;
mod retrieval_config;
mod router_config;

pub use analyzer_config::AnalyzerConfig;
pub use organizer_config::{OrganizerConfig, PositionStrategy};
pub use retrieval_config::RetrievalConfig;
pub use router_config::{RetrievalMode, RouterConfig};

use serde::{Deserialize, Serialize};

use crate::errors::{CineError, CineResult};

/// Aggregated configuration for one pipeline instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub analyzer: AnalyzerConfig,
    pub retrieval: RetrievalConfig,
    pub organizer: OrganizerConfig,
    pub router: RouterConfig,
}

impl PipelineConfig {
    /// Parse a TOML document; missing sections fall back to defaults.
    pub fn from_toml_str(text: &str) -> CineResult<Self> {
        toml::from_str(text).map_err(|e| CineError::Config(e.to_string()))
    }
}
