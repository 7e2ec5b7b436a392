//! Heuristic query rewriting for weak or underspecified queries.

use cinerag_core::models::{AnalyzedQuery, Entity, EntityKind, Relation};
use cinerag_core::Confidence;

/// Shorthand spelled out before any other rewriting.
const ABBREVIATIONS: [(&str, &str); 5] = [
    ("hd", "hành động"),
    ("tc", "tình cảm"),
    ("kh", "khoa học viễn tưởng"),
    ("sci-fi", "science fiction"),
    ("rom-com", "romantic comedy"),
];

/// Whether the query is weak enough to warrant a rewrite: low confidence
/// with few entities, complex but relation-free, or too short to carry
/// intent.
pub fn needs_rewrite(
    cleaned: &str,
    entities: &[Entity],
    relations: &[Relation],
    confidence: Confidence,
    complex: bool,
) -> bool {
    let token_count = cleaned.split_whitespace().count();
    (confidence.value() < 0.5 && entities.len() < 2)
        || (relations.is_empty() && complex)
        || (token_count <= 3 && entities.is_empty())
}

/// Produce the rewritten query. Abbreviations are expanded in place; a
/// "Movie" prefix is added when nothing signals the movie domain. Returns
/// `None` when the rewrite would be identical to the input.
pub fn rewrite(cleaned: &str, entities: &[Entity]) -> Option<String> {
    let mut out = String::new();
    for (i, token) in cleaned.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let expanded = ABBREVIATIONS
            .iter()
            .find(|(short, _)| token.eq_ignore_ascii_case(short))
            .map(|(_, long)| *long)
            .unwrap_or(token);
        out.push_str(expanded);
    }

    let lower = out.to_lowercase();
    let has_domain_word =
        lower.contains("phim") || lower.contains("movie") || lower.contains("film");
    let has_movie_entity = entities.iter().any(|e| e.kind == EntityKind::Movie);
    if !has_domain_word && !has_movie_entity {
        out = format!("Movie {out}");
    }

    if out == cleaned {
        None
    } else {
        Some(out)
    }
}
