//! The query analyzer: validation through confidence scoring.

use std::sync::Arc;

use tracing::{debug, info, warn};

use cinerag_core::config::AnalyzerConfig;
use cinerag_core::constants::{MAX_QUERY_LEN, MIN_QUERY_LEN};
use cinerag_core::errors::AnalysisError;
use cinerag_core::models::{AnalyzedQuery, Entity, UsageStats};
use cinerag_core::traits::{IGenerationService, SafetyMode, SamplingOptions};
use cinerag_core::retry::RetryPolicy;
use cinerag_core::CineResult;

use crate::cache::QueryCache;
use crate::extract::{entities, relations};
use crate::{decompose, expansion, rewrite, scoring, structure};

/// Analyzes raw question text into a structured, scored form.
///
/// Holds a bounded result cache and usage counters; not `Sync`. The
/// generation service is only consulted for the entity-extraction
/// fallback and for decomposition, and both degrade gracefully when it
/// fails.
pub struct QueryAnalyzer {
    generation: Arc<dyn IGenerationService>,
    config: AnalyzerConfig,
    cache: QueryCache,
    retry: RetryPolicy,
    stats: UsageStats,
}

impl QueryAnalyzer {
    pub fn new(generation: Arc<dyn IGenerationService>, config: AnalyzerConfig) -> Self {
        let cache = QueryCache::new(config.cache_capacity);
        Self {
            generation,
            config,
            cache,
            retry: RetryPolicy::generation(),
            stats: UsageStats::default(),
        }
    }

    /// Replace the retry policy for model sub-calls. Tests zero the
    /// backoff through this.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Run the full analysis pass over one query.
    pub fn analyze(&mut self, text: &str, use_cache: bool) -> CineResult<AnalyzedQuery> {
        let cleaned = validate_and_clean(text)?;
        let cache_key = QueryCache::key_for(&cleaned);

        if use_cache {
            if let Some(hit) = self.cache.get(&cache_key) {
                debug!(cache_key = %cache_key, "analyzer cache hit");
                let mut result = hit.clone();
                result.cached = true;
                self.stats.queries_processed += 1;
                self.stats.cache_hits += 1;
                return Ok(result);
            }
        }

        // Step 1: relations first; they decide how capitalized name
        // phrases are typed.
        let found_relations = relations::extract(&cleaned);
        let person_context =
            relations::has_person_relation(&found_relations) || has_person_marker(&cleaned);

        // Step 2: rule-based entities, with the model fallback when the
        // rules found too little to work with.
        let mut found_entities = entities::extract_rule_based(&cleaned, person_context);
        let concrete = found_entities.iter().filter(|e| e.kind.is_linkable()).count();
        if self.config.model_extraction && concrete < 2 {
            found_entities = self.model_extraction_pass(&cleaned, found_entities);
        }

        // Step 3: structure, decomposition, expansion.
        let structured = structure::build(&found_entities, &found_relations);
        let complex = decompose::is_complex(&cleaned);
        let sub_queries = if complex && self.config.decomposition {
            self.decompose_pass(&cleaned)
        } else {
            Vec::new()
        };
        let expanded_terms = expansion::expand(&cleaned, &found_entities);

        // Step 4: score, then rewrite weak queries.
        let confidence =
            scoring::score(&found_entities, &found_relations, &expanded_terms, &structured);
        let rewritten = if rewrite::needs_rewrite(
            &cleaned,
            &found_entities,
            &found_relations,
            confidence,
            complex,
        ) {
            rewrite::rewrite(&cleaned, &found_entities)
        } else {
            None
        };

        self.stats.queries_processed += 1;
        self.stats.entities_found += found_entities.len() as u64;
        self.stats.relations_found += found_relations.len() as u64;

        let result = AnalyzedQuery {
            raw: text.to_string(),
            cleaned,
            entities: found_entities,
            relations: found_relations,
            structured,
            sub_queries,
            expanded_terms,
            confidence,
            rewritten,
            cache_key: cache_key.clone(),
            cached: false,
        };
        info!(
            entities = result.entities.len(),
            relations = result.relations.len(),
            confidence = result.confidence.value(),
            rewritten = result.rewritten.is_some(),
            "query analyzed"
        );

        // Low-confidence results are not worth caching.
        if use_cache && result.confidence.is_cacheable() {
            self.cache.insert(cache_key, result.clone());
        }
        Ok(result)
    }

    fn model_extraction_pass(&self, cleaned: &str, found: Vec<Entity>) -> Vec<Entity> {
        let prompt = entities::extraction_prompt(cleaned);
        match self.retry.run("entity_extraction", || {
            self.generation
                .generate(&prompt, &SamplingOptions::grounded(), SafetyMode::Standard)
        }) {
            Ok(response) => {
                let mut merged = found;
                merged.extend(entities::parse_model_entities(&response));
                entities::dedup(merged)
            }
            Err(e) => {
                warn!(error = %e, "model entity extraction failed, keeping rule-based results");
                found
            }
        }
    }

    fn decompose_pass(&self, cleaned: &str) -> Vec<String> {
        let prompt = decompose::decomposition_prompt(cleaned);
        match self.retry.run("decomposition", || {
            self.generation
                .generate(&prompt, &SamplingOptions::grounded(), SafetyMode::Standard)
        }) {
            Ok(response) => decompose::parse_sub_queries(&response, cleaned),
            Err(e) => {
                warn!(error = %e, "decomposition failed, keeping query whole");
                vec![cleaned.to_string()]
            }
        }
    }

    pub fn stats(&self) -> UsageStats {
        self.stats
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

/// Person-marker keywords checked before entity extraction runs.
fn has_person_marker(cleaned: &str) -> bool {
    let lower = cleaned.to_lowercase();
    ["đạo diễn", "diễn viên", "director", "actor"]
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Reject out-of-bounds input, then normalize whitespace and quotes.
fn validate_and_clean(text: &str) -> Result<String, AnalysisError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return Err(AnalysisError::TooShort {
            len: trimmed.chars().count(),
            min: MIN_QUERY_LEN,
        });
    }
    if trimmed.chars().count() > MAX_QUERY_LEN {
        return Err(AnalysisError::TooLong {
            len: trimmed.chars().count(),
            max: MAX_QUERY_LEN,
        });
    }

    let normalized: String = trimmed
        .chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            c => c,
        })
        .collect();
    Ok(normalized.split_whitespace().collect::<Vec<_>>().join(" "))
}
