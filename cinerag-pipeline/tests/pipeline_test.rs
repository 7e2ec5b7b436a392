//! End-to-end routing behavior with scripted collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cinerag_core::config::{AnalyzerConfig, PipelineConfig, RetrievalMode};
use cinerag_core::errors::{EmbeddingError, GenerationError, GraphError, RetrievalError};
use cinerag_core::models::{
    AnswerMethod, CatalogItem, ChatTurn, GraphEdge, GraphNeighbor, GraphNode, GraphRelation,
    NodeKind, RouteKind, VectorHit,
};
use cinerag_core::traits::{
    EmbeddingTask, IEmbeddingService, IGenerationService, IGraphStore, IVectorStore, NodeLookup,
    SafetyMode, SamplingOptions,
};
use cinerag_pipeline::RagPipeline;

const NOLAN_QUERY: &str = "Phim hành động của Christopher Nolan";
const GROUNDED_ANSWER: &str = "Christopher Nolan directed several acclaimed action films, \
including Inception, a layered heist story set inside shared dreams that was widely praised.";

struct StubEmbedding;

impl IEmbeddingService for StubEmbedding {
    fn embed(&self, _text: &str, _task: EmbeddingTask) -> Result<Vec<f32>, EmbeddingError> {
        Ok(vec![0.5; 4])
    }

    fn dimensions(&self) -> usize {
        4
    }
}

struct StubVectors {
    score: f64,
}

impl IVectorStore for StubVectors {
    fn search(&self, _vector: &[f32], top_k: usize) -> Result<Vec<VectorHit>, RetrievalError> {
        Ok((0..top_k)
            .map(|i| VectorHit {
                id: format!("m{i}"),
                score: self.score,
                payload: CatalogItem {
                    title: format!("Inception {i}"),
                    year: Some(2010),
                    overview: "A heist inside layered dreams.".into(),
                    ..CatalogItem::default()
                },
            })
            .collect())
    }
}

struct StubGraph {
    fail_edges: bool,
}

impl IGraphStore for StubGraph {
    fn find_nodes(
        &self,
        _lookup: NodeLookup,
        name: &str,
        _limit: usize,
    ) -> Result<Vec<GraphNode>, GraphError> {
        Ok(vec![GraphNode {
            id: format!("node-{name}"),
            name: name.to_string(),
            kind: NodeKind::Person,
        }])
    }

    fn k_hop_neighbors(
        &self,
        seeds: &[String],
        _max_hops: u32,
        _max_nodes: usize,
    ) -> Result<Vec<GraphNeighbor>, GraphError> {
        Ok(seeds
            .iter()
            .map(|seed| GraphNeighbor {
                id: format!("{seed}-n"),
                name: "Inception".into(),
                kind: NodeKind::Movie,
                distance: 1,
            })
            .collect())
    }

    fn relationships_between(
        &self,
        node_ids: &[String],
        _limit: usize,
    ) -> Result<Vec<GraphEdge>, GraphError> {
        if self.fail_edges {
            return Err(GraphError::Unavailable {
                reason: "graph down".into(),
            });
        }
        Ok(node_ids
            .windows(2)
            .map(|pair| GraphEdge {
                source: pair[0].clone(),
                relation: GraphRelation::Directed,
                target: pair[1].clone(),
            })
            .collect())
    }
}

/// Returns scripted responses in order, repeating the last one; `None`
/// entries fail with a transient error.
struct ScriptedGeneration {
    responses: Mutex<Vec<Option<String>>>,
    calls: AtomicUsize,
    safeties: Mutex<Vec<SafetyMode>>,
}

impl ScriptedGeneration {
    fn new(responses: &[Option<&str>]) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
            safeties: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn safeties(&self) -> Vec<SafetyMode> {
        self.safeties.lock().unwrap().clone()
    }
}

impl IGenerationService for ScriptedGeneration {
    fn generate(
        &self,
        _prompt: &str,
        _sampling: &SamplingOptions,
        safety: SafetyMode,
    ) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.safeties.lock().unwrap().push(safety);
        let responses = self.responses.lock().unwrap();
        let index = call.min(responses.len().saturating_sub(1));
        match responses.get(index).cloned().flatten() {
            Some(answer) => Ok(answer),
            None => Err(GenerationError::Transient {
                reason: "model down".into(),
            }),
        }
    }
}

fn config(mode: RetrievalMode) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    // Scripted generation responses must map 1:1 to router calls.
    config.analyzer = AnalyzerConfig {
        model_extraction: false,
        decomposition: false,
        ..AnalyzerConfig::default()
    };
    config.router.mode = mode;
    config
}

fn pipeline(
    generation: Arc<ScriptedGeneration>,
    vector_score: f64,
    fail_edges: bool,
    mode: RetrievalMode,
) -> RagPipeline {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("cinerag=debug")
        .try_init();
    RagPipeline::new(
        Arc::new(StubEmbedding),
        Arc::new(StubVectors {
            score: vector_score,
        }),
        Arc::new(StubGraph { fail_edges }),
        generation,
        config(mode),
    )
    .without_backoff()
}

#[test]
fn too_short_query_is_rejected_with_a_message() {
    let generation = Arc::new(ScriptedGeneration::new(&[Some(GROUNDED_ANSWER)]));
    let mut p = pipeline(generation.clone(), 0.9, false, RetrievalMode::Advanced);
    let answer = p.query("hi", &[]);
    assert!(answer.contains("too short"));
    assert_eq!(p.last_decision().unwrap().kind, RouteKind::Error);
    assert!(p.last_method().is_none());
    assert_eq!(generation.calls(), 0);
}

#[test]
fn confident_query_with_good_hits_grounds_the_answer() {
    let generation = Arc::new(ScriptedGeneration::new(&[Some(GROUNDED_ANSWER)]));
    let mut p = pipeline(generation.clone(), 0.9, false, RetrievalMode::Advanced);
    let answer = p.query(NOLAN_QUERY, &[]);
    assert_eq!(answer, GROUNDED_ANSWER);
    assert_eq!(p.last_method(), Some(AnswerMethod::AdvancedRetrieval));
    assert_eq!(p.last_decision().unwrap().kind, RouteKind::Grounded);
    assert_eq!(generation.calls(), 1);
}

#[test]
fn low_relevance_hits_route_to_fallback() {
    // Scenario: all vector scores below the advanced threshold.
    let generation = Arc::new(ScriptedGeneration::new(&[Some(
        "Christopher Nolan is known for cerebral action blockbusters such as Inception \
and The Dark Knight trilogy, praised for practical effects and layered plots.",
    )]));
    let mut p = pipeline(generation.clone(), 0.1, false, RetrievalMode::Advanced);
    p.query(NOLAN_QUERY, &[]);
    assert_eq!(p.last_method(), Some(AnswerMethod::FallbackGeneralKnowledge));
    let decision = p.last_decision().unwrap();
    assert_eq!(decision.kind, RouteKind::Fallback);
    assert!(decision.reason.contains("relevance filtering"));
    assert_eq!(generation.calls(), 1);
}

#[test]
fn safety_mode_follows_the_route() {
    // Grounded generation keeps standard filtering.
    let generation = Arc::new(ScriptedGeneration::new(&[Some(GROUNDED_ANSWER)]));
    let mut p = pipeline(generation.clone(), 0.9, false, RetrievalMode::Advanced);
    p.query(NOLAN_QUERY, &[]);
    assert_eq!(generation.safeties(), vec![SafetyMode::Standard]);

    // The general-knowledge fallback relaxes it.
    let generation = Arc::new(ScriptedGeneration::new(&[Some(
        "Christopher Nolan is best known for Inception, Interstellar and the Dark Knight \
trilogy, all built around large-scale practical effects and layered structure.",
    )]));
    let mut p = pipeline(generation.clone(), 0.1, false, RetrievalMode::Advanced);
    p.query(NOLAN_QUERY, &[]);
    assert_eq!(generation.safeties(), vec![SafetyMode::Permissive]);
}

#[test]
fn weak_grounded_answer_reroutes_exactly_once() {
    // Both the grounded and the fallback answers hedge; the router must
    // still terminate after a single re-route.
    let generation = Arc::new(ScriptedGeneration::new(&[
        Some("Tôi không chắc về điều này."),
        Some("Tôi không chắc, nhưng đây là câu trả lời chung."),
    ]));
    let mut p = pipeline(generation.clone(), 0.9, false, RetrievalMode::Advanced);
    let answer = p.query(NOLAN_QUERY, &[]);
    assert_eq!(answer, "Tôi không chắc, nhưng đây là câu trả lời chung.");
    assert_eq!(p.last_method(), Some(AnswerMethod::FallbackGeneralKnowledge));
    assert_eq!(generation.calls(), 2);
}

#[test]
fn augmented_mode_makes_three_calls_and_synthesizes() {
    let generation = Arc::new(ScriptedGeneration::new(&[
        Some(GROUNDED_ANSWER),
        Some("General knowledge about Nolan's films."),
        Some("Final merged answer about Nolan's action films."),
    ]));
    let mut p = pipeline(generation.clone(), 0.9, false, RetrievalMode::Augmented);
    let answer = p.query(NOLAN_QUERY, &[]);
    assert_eq!(answer, "Final merged answer about Nolan's action films.");
    assert_eq!(p.last_method(), Some(AnswerMethod::AugmentedResponse));
    assert_eq!(generation.calls(), 3);
}

#[test]
fn basic_mode_stays_vector_only() {
    let generation = Arc::new(ScriptedGeneration::new(&[Some(GROUNDED_ANSWER)]));
    let mut p = pipeline(generation.clone(), 0.9, false, RetrievalMode::Basic);
    p.query(NOLAN_QUERY, &[]);
    assert_eq!(p.last_method(), Some(AnswerMethod::BasicRetrieval));
    assert_eq!(generation.calls(), 1);
}

#[test]
fn enrichment_outage_degrades_without_failing() {
    let generation = Arc::new(ScriptedGeneration::new(&[Some(GROUNDED_ANSWER)]));
    let mut p = pipeline(generation, 0.9, true, RetrievalMode::Advanced);
    p.query(NOLAN_QUERY, &[]);
    assert_eq!(p.last_decision().unwrap().kind, RouteKind::Grounded);
    let events = p.drain_degradation_events();
    assert!(events.iter().any(|e| e.component == "graph_enrichment"));
    assert!(p.drain_degradation_events().is_empty());
}

#[test]
fn exhausted_generation_returns_an_apology() {
    let generation = Arc::new(ScriptedGeneration::new(&[None]));
    let mut p = pipeline(generation.clone(), 0.9, false, RetrievalMode::Advanced);
    let answer = p.query(NOLAN_QUERY, &[]);
    assert!(answer.starts_with("Xin lỗi"));
    let decision = p.last_decision().unwrap();
    assert_eq!(decision.kind, RouteKind::Error);
    assert!(decision.reason.contains("exhausted after 3 attempts"));
    // Grounded attempt retried to exhaustion.
    assert_eq!(generation.calls(), 3);
}

#[test]
fn history_is_threaded_into_the_prompt_without_changing_routing() {
    let generation = Arc::new(ScriptedGeneration::new(&[Some(GROUNDED_ANSWER)]));
    let mut p = pipeline(generation, 0.9, false, RetrievalMode::Advanced);
    let history = vec![
        ChatTurn::user("phim nào hay?"),
        ChatTurn::assistant("Bạn thích thể loại nào?"),
    ];
    p.query(NOLAN_QUERY, &history);
    assert_eq!(p.last_decision().unwrap().kind, RouteKind::Grounded);
}

#[test]
fn stats_accumulate_across_queries() {
    let generation = Arc::new(ScriptedGeneration::new(&[Some(GROUNDED_ANSWER)]));
    let mut p = pipeline(generation, 0.9, false, RetrievalMode::Advanced);
    p.query(NOLAN_QUERY, &[]);
    p.query(NOLAN_QUERY, &[]);
    let stats = p.stats();
    assert_eq!(stats.queries_processed, 2);
    assert!(stats.cache_hit_rate > 0.0);
    assert!(stats.avg_entities_per_query > 0.0);
}
