//! Traversal depth prediction.
//!
//! Rule table first, then the caller-supplied category map, then the
//! default. Depth never exceeds the hard traversal bound.

use cinerag_core::config::defaults::{DEFAULT_TRAVERSAL_DEPTH, MAX_TRAVERSAL_DEPTH};
use cinerag_core::models::{AnalyzedQuery, RetrievalHints};

/// Simple factual lookups stay at one hop.
const SIMPLE_PATTERNS: [&str; 10] = [
    "là gì",
    "là ai",
    "tên gì",
    "năm nào",
    "ai đạo diễn",
    "do ai",
    "what is",
    "who is",
    "which year",
    "when was",
];

/// Comparisons and multi-entity relationship questions need three hops.
const COMPLEX_PATTERNS: [&str; 8] = [
    "so sánh",
    "khác nhau",
    "mối quan hệ",
    "cùng làm việc",
    "hợp tác",
    "compare",
    "difference",
    "worked together",
];

/// Recommendation and similarity questions get two hops.
const RECOMMENDATION_PATTERNS: [&str; 8] = [
    "giống",
    "tương tự",
    "nên xem",
    "đề xuất",
    "gợi ý",
    "similar",
    "recommend",
    "suggest",
];

pub fn predict(analyzed: &AnalyzedQuery, hints: RetrievalHints) -> u32 {
    let lower = analyzed.effective_text().to_lowercase();

    let depth = if SIMPLE_PATTERNS.iter().any(|p| lower.contains(p)) {
        1
    } else if COMPLEX_PATTERNS.iter().any(|p| lower.contains(p)) {
        3
    } else if RECOMMENDATION_PATTERNS.iter().any(|p| lower.contains(p)) {
        2
    } else if let Some(category) = hints.category {
        category.default_depth()
    } else {
        DEFAULT_TRAVERSAL_DEPTH
    };

    depth.min(MAX_TRAVERSAL_DEPTH)
}
