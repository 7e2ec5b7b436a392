//! Model serialization: wire names and round-trips.

use proptest::prelude::*;

use cinerag_core::models::{
    AnswerMethod, CatalogItem, ContextItem, ContextSource, EntityKind, RelationKind, VectorHit,
};
use cinerag_core::{Confidence, Entity};

#[test]
fn entity_kinds_use_screaming_snake_case() {
    let json = serde_json::to_string(&EntityKind::MovieMarker).unwrap();
    assert_eq!(json, "\"MOVIE_MARKER\"");
    let parsed: EntityKind = serde_json::from_str("\"PERSON\"").unwrap();
    assert_eq!(parsed, EntityKind::Person);
}

#[test]
fn relation_kinds_round_trip() {
    for kind in RelationKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        let parsed: RelationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, kind);
    }
}

#[test]
fn confidence_serializes_as_a_bare_number() {
    let entity = Entity::new("Inception", EntityKind::Movie, 0.9);
    let json = serde_json::to_string(&entity).unwrap();
    assert!(json.contains("\"confidence\":0.9"));
    let parsed: Entity = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.confidence, Confidence::new(0.9));
}

#[test]
fn vector_hit_payload_fills_missing_fields() {
    let hit: VectorHit = serde_json::from_str(
        r#"{"id": "m1", "score": 0.8, "payload": {"title": "Inception"}}"#,
    )
    .unwrap();
    assert_eq!(hit.payload.title, "Inception");
    assert_eq!(hit.payload.year, None);
    assert!(hit.payload.genres.is_empty());
}

#[test]
fn context_item_round_trips() {
    let item = ContextItem::new("Movie: Tenet (2 hops)", ContextSource::Graph)
        .with_relevance(0.4)
        .with_hop(2);
    let json = serde_json::to_string(&item).unwrap();
    let parsed: ContextItem = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, item);
}

#[test]
fn answer_methods_have_stable_tags() {
    assert_eq!(
        AnswerMethod::FallbackGeneralKnowledge.as_str(),
        "fallback_general_knowledge"
    );
    let json = serde_json::to_string(&AnswerMethod::AugmentedResponse).unwrap();
    assert_eq!(json, "\"augmented_response\"");
}

#[test]
fn catalog_item_default_is_empty() {
    let item = CatalogItem::default();
    assert!(item.title.is_empty());
    assert!(item.overview.is_empty());
}

proptest! {
    #[test]
    fn confidence_clamps_any_input_into_unit_range(raw in -100.0f64..100.0) {
        let c = Confidence::new(raw);
        prop_assert!((0.0..=1.0).contains(&c.value()));
    }

    #[test]
    fn confidence_survives_a_serde_round_trip(raw in 0.0f64..=1.0) {
        let c = Confidence::new(raw);
        let json = serde_json::to_string(&c).unwrap();
        let back: Confidence = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, c);
    }
}
