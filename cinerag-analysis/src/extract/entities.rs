//! Rule-based entity extraction with a model-backed fallback.
//!
//! Signals, strongest first: quoted substrings (0.9, movie titles),
//! 4-digit years (1.0), capitalized multi-word phrases (0.8, typed
//! person or movie depending on context cues), and keyword type markers
//! (0.9). The model fallback parses `name|TYPE` pairs at 0.85.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use cinerag_core::models::{Entity, EntityKind};

/// Confidence per signal type.
const QUOTED_CONFIDENCE: f64 = 0.9;
const YEAR_CONFIDENCE: f64 = 1.0;
const CAPITALIZED_CONFIDENCE: f64 = 0.8;
const MARKER_CONFIDENCE: f64 = 0.9;
const MODEL_CONFIDENCE: f64 = 0.85;

/// Question words never treated as titles or names.
const STOPWORDS: [&str; 6] = ["what", "where", "when", "who", "how", "why"];

/// Keyword dictionaries mapping category markers to entity kinds.
/// Vietnamese-first, with English equivalents.
fn marker_table() -> &'static [(EntityKind, &'static [&'static str])] {
    &[
        (
            EntityKind::MovieMarker,
            &["phim", "movie", "film", "bộ phim", "tác phẩm"],
        ),
        (
            EntityKind::PersonMarker,
            &["đạo diễn", "diễn viên", "director", "actor", "người"],
        ),
        (
            EntityKind::GenreMarker,
            &[
                "thể loại",
                "genre",
                "hành động",
                "tình cảm",
                "kinh dị",
                "hài",
                "viễn tưởng",
            ],
        ),
    ]
}

fn quoted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)"|《([^》]+)》"#).unwrap())
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap())
}

fn capitalized_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Two or more consecutive capitalized ASCII words. A lone capitalized
    // word is usually just the start of a sentence.
    RE.get_or_init(|| {
        Regex::new(r"\b([A-Z][A-Za-z'&:-]*(?:\s+[A-Z][A-Za-z'&:-]*)+)\b").unwrap()
    })
}

/// Rule-based pass. `person_context` types capitalized phrases as PERSON
/// (a directing/acting relation or person marker is present in the query).
pub fn extract_rule_based(cleaned: &str, person_context: bool) -> Vec<Entity> {
    let lower = cleaned.to_lowercase();
    let mut entities = Vec::new();

    for caps in quoted_re().captures_iter(cleaned) {
        let text = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        if accepts(text) {
            entities.push(Entity::new(text, EntityKind::Movie, QUOTED_CONFIDENCE));
        }
    }

    for caps in year_re().captures_iter(cleaned) {
        entities.push(Entity::new(&caps[1], EntityKind::Year, YEAR_CONFIDENCE));
    }

    let name_kind = if person_context {
        EntityKind::Person
    } else {
        EntityKind::Movie
    };
    for caps in capitalized_re().captures_iter(cleaned) {
        let text = caps[1].trim();
        if accepts(text) {
            entities.push(Entity::new(text, name_kind, CAPITALIZED_CONFIDENCE));
        }
    }

    for (kind, keywords) in marker_table() {
        for keyword in *keywords {
            if lower.contains(keyword) {
                entities.push(Entity::new(*keyword, *kind, MARKER_CONFIDENCE));
            }
        }
    }

    dedup(entities)
}

fn accepts(text: &str) -> bool {
    text.len() > 2 && !STOPWORDS.contains(&text.to_lowercase().as_str())
}

/// Remove duplicates by (lowercased text, kind), keeping the first
/// (strongest-signal) occurrence.
pub fn dedup(entities: Vec<Entity>) -> Vec<Entity> {
    let mut seen = HashSet::new();
    entities
        .into_iter()
        .filter(|e| seen.insert(e.dedup_key()))
        .collect()
}

/// Prompt asking the model for `name|TYPE` pairs.
pub fn extraction_prompt(query: &str) -> String {
    format!(
        "Extract all movie-related entities from this query. Return ONLY a \
comma-separated list.\n\n\
Query: \"{query}\"\n\n\
Extract:\n\
- Movie titles (if mentioned)\n\
- Person names (actors, directors)\n\
- Genres\n\
- Years\n\n\
Format: EntityName|Type\n\
Example: \"Inception|MOVIE, Christopher Nolan|PERSON, 2010|YEAR, sci-fi|GENRE\"\n\n\
Output (comma-separated):"
    )
}

/// Parse the model's comma-separated `name|TYPE` response. Malformed
/// items are skipped.
pub fn parse_model_entities(text: &str) -> Vec<Entity> {
    text.split(',')
        .filter_map(|item| {
            let (name, label) = item.trim().split_once('|')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Entity::new(
                name,
                EntityKind::parse_label(label),
                MODEL_CONFIDENCE,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_title_is_a_movie() {
        let entities = extract_rule_based("phim \"The Matrix\" hay không?", false);
        assert!(entities
            .iter()
            .any(|e| e.text == "The Matrix" && e.kind == EntityKind::Movie));
    }

    #[test]
    fn years_must_be_in_range() {
        let entities = extract_rule_based("phim năm 2010 và 1899 và 3000", false);
        let years: Vec<_> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Year)
            .collect();
        assert_eq!(years.len(), 1);
        assert_eq!(years[0].text, "2010");
    }

    #[test]
    fn capitalized_phrase_typed_by_context() {
        let person = extract_rule_based("Phim của Christopher Nolan", true);
        assert!(person
            .iter()
            .any(|e| e.text == "Christopher Nolan" && e.kind == EntityKind::Person));

        let movie = extract_rule_based("Tell me about Blade Runner", false);
        assert!(movie
            .iter()
            .any(|e| e.text == "Blade Runner" && e.kind == EntityKind::Movie));
    }

    #[test]
    fn lone_capitalized_word_is_ignored() {
        let entities = extract_rule_based("Phim hành động nào hay?", false);
        assert!(!entities.iter().any(|e| e.text == "Phim"));
    }

    #[test]
    fn markers_detected_in_vietnamese() {
        let entities = extract_rule_based("phim hành động của đạo diễn nổi tiếng", false);
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::MovieMarker && e.text == "phim"));
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::GenreMarker && e.text == "hành động"));
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::PersonMarker && e.text == "đạo diễn"));
    }

    #[test]
    fn dedup_is_case_insensitive_per_kind() {
        let entities = dedup(vec![
            Entity::new("Inception", EntityKind::Movie, 0.9),
            Entity::new("inception", EntityKind::Movie, 0.8),
            Entity::new("inception", EntityKind::Genre, 0.8),
        ]);
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn parses_model_pairs_and_skips_garbage() {
        let parsed = parse_model_entities("Inception|MOVIE, Christopher Nolan|person, junk");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].kind, EntityKind::Movie);
        assert_eq!(parsed[1].kind, EntityKind::Person);
    }
}
