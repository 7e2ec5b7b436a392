//! Dictionary-driven term expansion and search-query enhancement.

use std::collections::HashSet;

use cinerag_core::constants::{ENHANCED_QUERY_TERMS, MAX_EXPANSION_TERMS};
use cinerag_core::models::{Entity, EntityKind};

/// Bilingual keyword dictionary. Keys are matched as substrings of the
/// lowercased query.
fn expansion_table() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        ("phim", &["movie", "film", "bộ phim", "tác phẩm"]),
        ("hay", &["good", "great", "nổi tiếng", "đáng xem"]),
        ("hành động", &["action", "fighting", "chiến đấu"]),
        ("tình cảm", &["romance", "love", "lãng mạn"]),
        ("kinh dị", &["horror", "scary", "đáng sợ", "thriller"]),
        ("hài", &["comedy", "funny", "vui nhộn"]),
        ("viễn tưởng", &["sci-fi", "science fiction", "khoa học"]),
    ]
}

/// Facet terms added per present entity kind.
fn type_terms(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Movie | EntityKind::MovieMarker => {
            &["plot", "story", "narrative", "cốt truyện"]
        }
        EntityKind::Person | EntityKind::PersonMarker => {
            &["cast", "actor", "director", "filmmaker", "diễn xuất"]
        }
        EntityKind::Genre | EntityKind::GenreMarker => {
            &["theme", "style", "tone", "phong cách"]
        }
        _ => &[],
    }
}

/// Expand the query into related terms: dictionary hits first, then
/// type-aware facets. Order-preserving dedup, capped.
pub fn expand(cleaned: &str, entities: &[Entity]) -> Vec<String> {
    let lower = cleaned.to_lowercase();
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    let mut push = |term: &str, terms: &mut Vec<String>| {
        if terms.len() < MAX_EXPANSION_TERMS && seen.insert(term.to_string()) {
            terms.push(term.to_string());
        }
    };

    for (keyword, synonyms) in expansion_table() {
        if lower.contains(keyword) {
            for synonym in *synonyms {
                push(synonym, &mut terms);
            }
        }
    }

    let kinds: HashSet<EntityKind> = entities.iter().map(|e| e.kind).collect();
    for kind in [
        EntityKind::Movie,
        EntityKind::MovieMarker,
        EntityKind::Person,
        EntityKind::PersonMarker,
        EntityKind::Genre,
        EntityKind::GenreMarker,
    ] {
        if kinds.contains(&kind) {
            for term in type_terms(kind) {
                push(term, &mut terms);
            }
        }
    }

    terms
}

/// Build the text handed to the embedding model: the query itself,
/// concrete entity names not already present, and the top expansion
/// terms.
pub fn enhance_search_query(
    effective: &str,
    entities: &[Entity],
    expanded_terms: &[String],
) -> String {
    let lower = effective.to_lowercase();
    let mut parts = vec![effective.to_string()];

    for entity in entities {
        if entity.kind.is_linkable() && !lower.contains(&entity.text.to_lowercase()) {
            parts.push(entity.text.clone());
        }
    }
    for term in expanded_terms.iter().take(ENHANCED_QUERY_TERMS) {
        if !lower.contains(&term.to_lowercase()) {
            parts.push(term.clone());
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_hits_expand() {
        let terms = expand("phim hành động hay", &[]);
        assert!(terms.contains(&"movie".to_string()));
        assert!(terms.contains(&"action".to_string()));
        assert!(terms.contains(&"good".to_string()));
    }

    #[test]
    fn type_terms_follow_entity_kinds() {
        let entities = vec![Entity::new("Christopher Nolan", EntityKind::Person, 0.8)];
        let terms = expand("ai là Christopher Nolan", &entities);
        assert!(terms.contains(&"director".to_string()));
    }

    #[test]
    fn expansion_is_deduped_and_capped() {
        let entities = vec![
            Entity::new("phim", EntityKind::MovieMarker, 0.9),
            Entity::new("hành động", EntityKind::GenreMarker, 0.9),
        ];
        let terms = expand("phim hành động kinh dị hài viễn tưởng tình cảm hay", &entities);
        assert!(terms.len() <= MAX_EXPANSION_TERMS);
        let unique: HashSet<_> = terms.iter().collect();
        assert_eq!(unique.len(), terms.len());
    }

    #[test]
    fn enhanced_query_skips_terms_already_present() {
        let entities = vec![Entity::new("Inception", EntityKind::Movie, 0.9)];
        let enhanced = enhance_search_query(
            "phim Inception",
            &entities,
            &["movie".to_string(), "phim".to_string()],
        );
        assert_eq!(enhanced, "phim Inception movie");
    }
}
