/// Minimum accepted query length, in characters.
pub const MIN_QUERY_LEN: usize = 3;

/// Maximum accepted query length, in characters.
pub const MAX_QUERY_LEN: usize = 1000;

/// Maximum sub-queries produced by decomposition.
pub const MAX_SUB_QUERIES: usize = 4;

/// Decomposition lines shorter than this are discarded.
pub const MIN_SUB_QUERY_LEN: usize = 10;

/// Maximum expansion terms retained per query.
pub const MAX_EXPANSION_TERMS: usize = 10;

/// Expansion terms folded into the enhanced search query.
pub const ENHANCED_QUERY_TERMS: usize = 5;

/// Token count above which a query is considered complex.
pub const COMPLEX_TOKEN_THRESHOLD: usize = 20;

/// Linked graph nodes retained per extracted entity.
pub const MAX_LINKS_PER_ENTITY: usize = 3;

/// Synopsis truncation length inside fused context items.
pub const OVERVIEW_TRUNCATE_CHARS: usize = 200;

/// Grounded answers shorter than this many tokens trigger the fallback
/// re-route.
pub const MIN_ANSWER_TOKENS: usize = 15;

/// Unsupported marker phrases required before a disclaimer is prepended.
pub const HALLUCINATION_FLAG_THRESHOLD: usize = 2;
