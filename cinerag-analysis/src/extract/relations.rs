//! Regex-based relation extraction against a fixed taxonomy.
//!
//! At most one match is recorded per relation kind, confidence fixed at
//! 0.85. Patterns cover Vietnamese and English phrasings.

use std::sync::OnceLock;

use regex::Regex;

use cinerag_core::models::{Relation, RelationKind};

const RELATION_CONFIDENCE: f64 = 0.85;

struct RelationPattern {
    kind: RelationKind,
    regex: Regex,
}

fn taxonomy() -> &'static [RelationPattern] {
    static PATTERNS: OnceLock<Vec<RelationPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // Matched against the lowercased query, so "của \p{Ll}" vs name
        // casing is handled by matching the original-cased text for the
        // name-following patterns.
        let table: [(RelationKind, &str); 5] = [
            (
                RelationKind::DirectedBy,
                r"(đạo diễn|directed\s+by|của đạo diễn|phim của|movies?\s+by|films?\s+by)",
            ),
            (
                RelationKind::ActedIn,
                r"\b(diễn viên|actors?|actress|starring|vai diễn|role|performance|tham gia)\b",
            ),
            (
                RelationKind::BelongsTo,
                r"\b(thể loại|genre|thuộc thể loại|là phim|action|drama|comedy|horror|sci-?fi)\b",
            ),
            (
                RelationKind::SimilarTo,
                r"\b(giống|tương tự|như|like|similar|phong cách|style|kiểu)\b",
            ),
            (
                RelationKind::ReleasedIn,
                r"(\b(19|20)\d{2}\b|năm \d{4}|released\s+in|ra mắt)",
            ),
        ];
        table
            .into_iter()
            .map(|(kind, pattern)| RelationPattern {
                kind,
                regex: Regex::new(pattern).unwrap(),
            })
            .collect()
    })
}

/// "của <Name>" / "by <Name>": a possessive followed by a capitalized
/// name reads as a directing credit. Checked against the original-cased
/// text.
fn possessive_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(của|by)\s+\p{Lu}").unwrap())
}

/// Extract relations from the cleaned query. One hit per kind, taxonomy
/// order preserved.
pub fn extract(cleaned: &str) -> Vec<Relation> {
    let lower = cleaned.to_lowercase();
    let mut relations: Vec<Relation> = taxonomy()
        .iter()
        .filter(|p| p.regex.is_match(&lower))
        .map(|p| Relation {
            kind: p.kind,
            confidence: RELATION_CONFIDENCE.into(),
        })
        .collect();

    if possessive_name_re().is_match(cleaned)
        && !relations.iter().any(|r| r.kind == RelationKind::DirectedBy)
    {
        relations.insert(
            0,
            Relation {
                kind: RelationKind::DirectedBy,
                confidence: RELATION_CONFIDENCE.into(),
            },
        );
    }

    relations
}

/// Whether the query carries a person-flavored relation (directing or
/// acting). Used to type capitalized name phrases.
pub fn has_person_relation(relations: &[Relation]) -> bool {
    relations
        .iter()
        .any(|r| matches!(r.kind, RelationKind::DirectedBy | RelationKind::ActedIn))
}
