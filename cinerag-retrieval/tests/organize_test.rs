//! Organizer invariants over generated context lists.

use proptest::prelude::*;

use cinerag_core::config::{OrganizerConfig, PositionStrategy};
use cinerag_core::models::{ContextItem, ContextSource};
use cinerag_retrieval::ContextOrganizer;

fn item(text: String) -> ContextItem {
    ContextItem::new(text, ContextSource::Vector)
}

proptest! {
    #[test]
    fn output_never_exceeds_the_cap(
        texts in prop::collection::vec("[a-z]{2,8}( [a-z]{2,8}){0,6}", 0..40),
        max_contexts in 1usize..15,
    ) {
        let organizer = ContextOrganizer::new(OrganizerConfig {
            max_contexts,
            ..OrganizerConfig::default()
        });
        let contexts = texts.into_iter().map(item).collect();
        let organized = organizer.organize(contexts, "some query words", None);
        prop_assert!(organized.len() <= max_contexts);
    }

    #[test]
    fn reranking_is_a_permutation(
        texts in prop::collection::vec("[a-z]{2,8}( [a-z]{2,8}){0,4}", 1..10),
        strategy_idx in 0usize..3,
    ) {
        let strategy = [
            PositionStrategy::ImportantFirst,
            PositionStrategy::ImportantEdges,
            PositionStrategy::Sandwich,
        ][strategy_idx];
        let organizer = ContextOrganizer::new(OrganizerConfig {
            enable_pruning: false,
            enable_augmentation: false,
            position_strategy: strategy,
            max_contexts: 50,
            ..OrganizerConfig::default()
        });
        let contexts: Vec<ContextItem> = texts.iter().cloned().map(item).collect();
        let organized = organizer.organize(contexts, "query", None);
        prop_assert_eq!(organized.len(), texts.len());
        let mut input_texts = texts;
        let mut output_texts: Vec<String> =
            organized.into_iter().map(|c| c.text).collect();
        input_texts.sort();
        output_texts.sort();
        prop_assert_eq!(input_texts, output_texts);
    }
}

#[test]
fn diversity_invariant_on_near_duplicates() {
    let organizer = ContextOrganizer::new(OrganizerConfig {
        max_contexts: 10,
        diversity_threshold: 0.7,
        enable_reranking: false,
        enable_augmentation: false,
        ..OrganizerConfig::default()
    });
    let contexts: Vec<ContextItem> = (0..20)
        .map(|i| item(format!("a heist inside layered dreams variant {i}")))
        .collect();
    let organized = organizer.organize(contexts, "dream heist", None);
    assert!(organized.len() <= 10);
    assert!(!organized.is_empty());
}
