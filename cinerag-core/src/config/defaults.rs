//! Default values for every config knob, in one place.

pub const DEFAULT_CACHE_CAPACITY: usize = 100;

pub const DEFAULT_TOP_K_VECTOR: usize = 5;
pub const DEFAULT_TOP_K_BASIC: usize = 6;
pub const DEFAULT_MAX_TRAVERSAL_NODES: usize = 15;
pub const DEFAULT_MAX_RELATIONSHIPS: usize = 50;
pub const DEFAULT_TRAVERSAL_DEPTH: u32 = 2;
pub const MAX_TRAVERSAL_DEPTH: u32 = 3;

pub const DEFAULT_MAX_CONTEXTS: usize = 12;
pub const DEFAULT_DIVERSITY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MAX_HOP_DISTANCE: u32 = 2;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.75;
// The original used 0.5 for the hybrid path and 0.08 for the vector-only
// path; the gap is undocumented, so both stay tunable.
pub const DEFAULT_RELEVANCE_THRESHOLD_ADVANCED: f64 = 0.5;
pub const DEFAULT_RELEVANCE_THRESHOLD_BASIC: f64 = 0.08;
pub const DEFAULT_MAX_HISTORY_TURNS: usize = 8;
pub const DEFAULT_HISTORY_TRUNCATE_CHARS: usize = 150;
