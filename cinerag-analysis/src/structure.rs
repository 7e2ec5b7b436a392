//! Assembles the node/edge/filter skeleton from extraction output.

use cinerag_core::models::{
    Entity, EntityKind, QueryEdge, QueryNode, Relation, StructuredQuery,
};

/// Build the structured skeleton. Concrete entities become nodes, the
/// first YEAR entity becomes the year filter, relations become edges in
/// taxonomy order.
pub fn build(entities: &[Entity], relations: &[Relation]) -> StructuredQuery {
    let mut structured = StructuredQuery::default();

    for entity in entities {
        match entity.kind {
            EntityKind::Movie | EntityKind::Person | EntityKind::Genre => {
                structured.nodes.push(QueryNode {
                    label: entity.kind,
                    name: entity.text.clone(),
                });
            }
            EntityKind::Year => {
                if structured.year.is_none() {
                    structured.year = Some(entity.text.clone());
                }
            }
            _ => {}
        }
    }

    for relation in relations {
        structured.edges.push(QueryEdge {
            kind: relation.kind,
        });
    }

    structured
}
