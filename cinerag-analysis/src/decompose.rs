//! Complex-query detection and model-backed decomposition.

use cinerag_core::constants::{COMPLEX_TOKEN_THRESHOLD, MAX_SUB_QUERIES, MIN_SUB_QUERY_LEN};

/// Conjunctions and sequencing cues that mark a compound question.
const COMPLEXITY_MARKERS: [&str; 14] = [
    "và",
    "and",
    "hoặc",
    "or",
    "nhưng",
    "but",
    "sau đó",
    "then",
    "tiếp theo",
    "next",
    "so sánh",
    "compare",
    "khác nhau",
    "difference",
];

/// A query is complex when it carries at least two conjunction or
/// sequencing markers, or runs past the token threshold.
pub fn is_complex(cleaned: &str) -> bool {
    let lower = cleaned.to_lowercase();
    let marker_hits = COMPLEXITY_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count();
    marker_hits >= 2 || cleaned.split_whitespace().count() > COMPLEX_TOKEN_THRESHOLD
}

/// Prompt asking the model to break a compound question into standalone
/// sub-questions.
pub fn decomposition_prompt(query: &str) -> String {
    format!(
        "Break this complex movie question into simpler standalone \
sub-questions. Each sub-question must be answerable on its own.\n\n\
Question: \"{query}\"\n\n\
Return ONLY a numbered list, one sub-question per line:"
    )
}

/// Parse the model's numbered list. Numbering prefixes are stripped,
/// fragments shorter than the minimum are dropped, and the result is
/// capped. Falls back to the original query when nothing usable remains.
pub fn parse_sub_queries(text: &str, original: &str) -> Vec<String> {
    let mut subs: Vec<String> = text
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start_matches(['.', ')'])
                .trim()
                .to_string()
        })
        .filter(|line| line.len() >= MIN_SUB_QUERY_LEN)
        .collect();
    subs.truncate(MAX_SUB_QUERIES);
    if subs.is_empty() {
        subs.push(original.to_string());
    }
    subs
}
