//! Entity linking: query mentions to concrete graph nodes.

use tracing::{debug, warn};

use cinerag_core::constants::MAX_LINKS_PER_ENTITY;
use cinerag_core::models::{Entity, EntityKind, LinkedEntity};
use cinerag_core::traits::{IGraphStore, NodeLookup};

fn lookup_for(kind: EntityKind) -> Option<NodeLookup> {
    match kind {
        EntityKind::Movie => Some(NodeLookup::MovieTitle),
        EntityKind::Person => Some(NodeLookup::PersonName),
        EntityKind::Genre => Some(NodeLookup::GenreName),
        EntityKind::Unknown => Some(NodeLookup::Any),
        // Markers and years name categories, not things.
        EntityKind::Year
        | EntityKind::MovieMarker
        | EntityKind::PersonMarker
        | EntityKind::GenreMarker => None,
    }
}

/// Resolve each linkable entity via a type-specific name-contains lookup,
/// capped per entity. Lookup failures are logged and skipped.
pub fn link_entities(graph: &dyn IGraphStore, entities: &[Entity]) -> Vec<LinkedEntity> {
    let mut linked = Vec::new();
    for entity in entities {
        let Some(lookup) = lookup_for(entity.kind) else {
            continue;
        };
        match graph.find_nodes(lookup, &entity.text, MAX_LINKS_PER_ENTITY) {
            Ok(nodes) => {
                debug!(mention = %entity.text, matches = nodes.len(), "entity linked");
                linked.extend(nodes.into_iter().map(|node| LinkedEntity {
                    mention: entity.text.clone(),
                    node,
                }));
            }
            Err(e) => {
                warn!(mention = %entity.text, error = %e, "entity linking failed, skipping");
            }
        }
    }
    linked
}
