use std::fmt;

use serde::{Deserialize, Serialize};

/// Confidence score clamped to [0.0, 1.0].
/// Represents how certain the analyzer is about an extraction or a whole
/// query interpretation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// Below this, analyzer results are not worth caching.
    pub const CACHEABLE: f64 = 0.3;
    /// Default routing gate; queries below this skip retrieval.
    pub const ROUTING_GATE: f64 = 0.75;

    /// Create a new Confidence, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this result qualifies for the analyzer cache.
    pub fn is_cacheable(self) -> bool {
        self.0 >= Self::CACHEABLE
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Confidence::new(1.7).value(), 1.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
        assert_eq!(Confidence::new(0.5).value(), 0.5);
    }

    #[test]
    fn cacheable_threshold() {
        assert!(Confidence::new(0.3).is_cacheable());
        assert!(!Confidence::new(0.29).is_cacheable());
    }
}
