//! Analysis confidence scoring.
//!
//! Four signal groups, weighted 0.4 / 0.3 / 0.2 / 0.1. Absent groups are
//! excluded and the remaining weights renormalized, so a query with only
//! entity evidence is not punished for lacking relations.

use cinerag_core::constants::MAX_EXPANSION_TERMS;
use cinerag_core::models::{Entity, Relation, StructuredQuery};
use cinerag_core::Confidence;

const WEIGHT_ENTITIES: f64 = 0.4;
const WEIGHT_RELATIONS: f64 = 0.3;
const WEIGHT_EXPANSION: f64 = 0.2;
const WEIGHT_STRUCTURE: f64 = 0.1;

/// Confidence assigned when no signal group contributed.
const NO_SIGNAL_CONFIDENCE: f64 = 0.3;

pub fn score(
    entities: &[Entity],
    relations: &[Relation],
    expanded_terms: &[String],
    structured: &StructuredQuery,
) -> Confidence {
    let mut weighted = 0.0;
    let mut weight_sum = 0.0;

    if !entities.is_empty() {
        let avg: f64 =
            entities.iter().map(|e| e.confidence.value()).sum::<f64>() / entities.len() as f64;
        let coverage = (avg * entities.len() as f64 / 3.0).min(1.0);
        weighted += WEIGHT_ENTITIES * coverage;
        weight_sum += WEIGHT_ENTITIES;
    }

    if !relations.is_empty() {
        let avg: f64 =
            relations.iter().map(|r| r.confidence.value()).sum::<f64>() / relations.len() as f64;
        let coverage = (avg * relations.len() as f64 / 2.0).min(1.0);
        weighted += WEIGHT_RELATIONS * coverage;
        weight_sum += WEIGHT_RELATIONS;
    }

    if !expanded_terms.is_empty() {
        let coverage = (expanded_terms.len() as f64 / MAX_EXPANSION_TERMS as f64).min(1.0);
        weighted += WEIGHT_EXPANSION * coverage;
        weight_sum += WEIGHT_EXPANSION;
    }

    if !structured.is_empty() {
        let mut shape = 0.5;
        if !structured.nodes.is_empty() {
            shape += 0.25;
        }
        if !structured.edges.is_empty() {
            shape += 0.25;
        }
        weighted += WEIGHT_STRUCTURE * shape;
        weight_sum += WEIGHT_STRUCTURE;
    }

    if weight_sum == 0.0 {
        return Confidence::new(NO_SIGNAL_CONFIDENCE);
    }
    Confidence::new(weighted / weight_sum)
}
