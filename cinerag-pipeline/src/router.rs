//! The answer router: a confidence-gated state machine from analyzed
//! query to terminal answer.

use std::sync::Arc;

use tracing::{debug, info, warn};

use cinerag_analysis::QueryAnalyzer;
use cinerag_core::config::{PipelineConfig, RetrievalMode, RouterConfig};
use cinerag_core::errors::{CineError, RetrievalError};
use cinerag_core::models::{
    AnalyzedQuery, AnswerMethod, ChatTurn, ContextItem, ContextSource, DegradationEvent,
    PipelineStats, RetrievalHints, RetrievalOutcome, RouteKind, RoutingDecision,
};
use cinerag_core::retry::RetryPolicy;
use cinerag_core::traits::{
    IEmbeddingService, IGenerationService, IGraphStore, IVectorStore, SafetyMode,
    SamplingOptions,
};
use cinerag_retrieval::{fusion, ContextOrganizer, HybridRetriever};

use crate::{prompts, validate};

/// Returned when generation retries are exhausted. Never an error code.
const APOLOGY: &str =
    "Xin lỗi, tôi đang gặp sự cố khi xử lý câu hỏi của bạn. Vui lòng thử lại sau.";

/// Substituted when graph enrichment is empty or unavailable.
const ENRICHMENT_MARKER: &str = "Movie relationship details unavailable";

enum State {
    Analyze,
    Retrieve(AnalyzedQuery),
    Generate {
        context: String,
        method: AnswerMethod,
    },
    Validate {
        answer: String,
        context: String,
        method: AnswerMethod,
    },
    Fallback {
        reason: String,
    },
    Augment {
        context: String,
    },
    Done {
        answer: String,
        method: Option<AnswerMethod>,
        decision: RoutingDecision,
    },
}

/// One synchronous question-answering pipeline instance. Owns its cache
/// and counters; share across threads only behind external locking.
pub struct RagPipeline {
    analyzer: QueryAnalyzer,
    retriever: HybridRetriever,
    organizer: ContextOrganizer,
    generation: Arc<dyn IGenerationService>,
    config: RouterConfig,
    retry: RetryPolicy,
    last_method: Option<AnswerMethod>,
    last_decision: Option<RoutingDecision>,
    degradations: Vec<DegradationEvent>,
}

impl RagPipeline {
    pub fn new(
        embedding: Arc<dyn IEmbeddingService>,
        vector_store: Arc<dyn IVectorStore>,
        graph_store: Arc<dyn IGraphStore>,
        generation: Arc<dyn IGenerationService>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            analyzer: QueryAnalyzer::new(generation.clone(), config.analyzer),
            retriever: HybridRetriever::new(
                embedding,
                vector_store,
                graph_store,
                config.retrieval,
            ),
            organizer: ContextOrganizer::new(config.organizer),
            generation,
            config: config.router,
            retry: RetryPolicy::generation(),
            last_method: None,
            last_decision: None,
            degradations: Vec::new(),
        }
    }

    /// Zero all sub-call backoff. Used in tests.
    pub fn without_backoff(mut self) -> Self {
        self.retry = self.retry.without_backoff();
        self.analyzer = self
            .analyzer
            .with_retry_policy(RetryPolicy::generation().without_backoff());
        self.retriever = self
            .retriever
            .with_retry_policy(RetryPolicy::embedding().without_backoff());
        self
    }

    /// Answer one question. Never fails; every failure path resolves to a
    /// natural-language message plus a recorded decision.
    pub fn query(&mut self, text: &str, history: &[ChatTurn]) -> String {
        let history_text = prompts::history_window(
            history,
            self.config.max_history_turns,
            self.config.history_truncate_chars,
        );

        let mut fallback_used = false;
        let mut state = State::Analyze;
        loop {
            state = match state {
                State::Analyze => self.analyze_step(text),
                State::Retrieve(analyzed) => self.retrieve_step(&analyzed),
                State::Generate { context, method } => {
                    self.generate_step(text, context, method, &history_text)
                }
                State::Validate {
                    answer,
                    context,
                    method,
                } => {
                    let (checked, flags) = validate::apply_hallucination_check(answer, &context);
                    if flags > 0 {
                        debug!(flags, "unsupported marker phrases in answer");
                    }
                    if validate::needs_fallback(&checked) && !fallback_used {
                        fallback_used = true;
                        info!("grounded answer too weak, re-routing to fallback");
                        State::Fallback {
                            reason: "low-confidence grounded answer".into(),
                        }
                    } else {
                        State::Done {
                            answer: checked,
                            method: Some(method),
                            decision: RoutingDecision::new(
                                RouteKind::Grounded,
                                "grounded answer validated",
                            ),
                        }
                    }
                }
                State::Fallback { reason } => self.fallback_step(text, &reason, &history_text),
                State::Augment { context } => self.augment_step(text, context, &history_text),
                State::Done {
                    answer,
                    method,
                    decision,
                } => {
                    info!(method = ?method, kind = ?decision.kind, "query routed");
                    self.last_method = method;
                    self.last_decision = Some(decision);
                    return answer;
                }
            };
        }
    }

    fn analyze_step(&mut self, text: &str) -> State {
        let analyzed = match self.analyzer.analyze(text, true) {
            Ok(analyzed) => analyzed,
            Err(CineError::Analysis(e)) => {
                return State::Done {
                    answer: e.user_message(),
                    method: None,
                    decision: RoutingDecision::new(RouteKind::Error, e.to_string()),
                };
            }
            Err(e) => {
                warn!(error = %e, "analysis failed unexpectedly");
                return State::Done {
                    answer: APOLOGY.to_string(),
                    method: None,
                    decision: RoutingDecision::new(RouteKind::Error, e.to_string()),
                };
            }
        };

        if analyzed.confidence.value() < self.config.confidence_threshold {
            debug!(
                confidence = analyzed.confidence.value(),
                threshold = self.config.confidence_threshold,
                "confidence below gate, skipping retrieval"
            );
            return State::Fallback {
                reason: "analysis confidence below gate".into(),
            };
        }
        State::Retrieve(analyzed)
    }

    fn retrieve_step(&mut self, analyzed: &AnalyzedQuery) -> State {
        let threshold = self.config.relevance_threshold();

        if self.config.mode == RetrievalMode::Basic {
            let (hits, degradations) = self.retriever.retrieve_basic(analyzed);
            self.degradations.extend(degradations);
            let surviving: Vec<_> =
                hits.into_iter().filter(|hit| hit.score >= threshold).collect();
            if surviving.is_empty() {
                return State::Fallback {
                    reason: RetrievalError::Empty.to_string(),
                };
            }
            let context = surviving
                .iter()
                .map(|hit| fusion::catalog_entry(&hit.payload))
                .collect::<Vec<_>>()
                .join("\n\n");
            return State::Generate {
                context,
                method: AnswerMethod::BasicRetrieval,
            };
        }

        let retrieved = self.retriever.retrieve(analyzed, RetrievalHints::default());
        self.degradations.extend(retrieved.degradations);

        let mut contexts: Vec<ContextItem> = retrieved
            .outcome
            .contexts
            .into_iter()
            .filter(|c| c.source != ContextSource::Vector || c.relevance >= threshold)
            .collect();
        let surviving_vector = contexts
            .iter()
            .filter(|c| c.source == ContextSource::Vector)
            .count();
        if surviving_vector == 0 {
            return State::Fallback {
                reason: RetrievalError::Empty.to_string(),
            };
        }

        match self.retriever.enrich(&retrieved.node_ids) {
            Ok(items) if !items.is_empty() => contexts.extend(items),
            Ok(_) => {
                contexts.push(ContextItem::new(ENRICHMENT_MARKER, ContextSource::Other));
            }
            Err(e) => {
                warn!(error = %e, "enrichment unavailable, substituting marker");
                self.degradations.push(DegradationEvent::now(
                    "graph_enrichment",
                    e.to_string(),
                    ENRICHMENT_MARKER,
                ));
                contexts.push(ContextItem::new(ENRICHMENT_MARKER, ContextSource::Other));
            }
        }

        if self.config.enable_organizer {
            let metadata = RetrievalOutcome {
                contexts: Vec::new(),
                vector_count: surviving_vector,
                graph_count: retrieved.outcome.graph_count,
                linked_entity_count: retrieved.outcome.linked_entity_count,
                depth: retrieved.outcome.depth,
            };
            contexts = self
                .organizer
                .organize(contexts, analyzed.effective_text(), Some(&metadata));
        }

        let context = contexts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        if self.config.mode == RetrievalMode::Augmented {
            State::Augment { context }
        } else {
            State::Generate {
                context,
                method: AnswerMethod::AdvancedRetrieval,
            }
        }
    }

    fn generate_step(
        &mut self,
        question: &str,
        context: String,
        method: AnswerMethod,
        history: &str,
    ) -> State {
        let prompt = prompts::grounded(question, &context, history);
        match self.generate(&prompt, SamplingOptions::grounded(), SafetyMode::Standard) {
            Ok(answer) => State::Validate {
                answer,
                context,
                method,
            },
            Err(decision) => State::Done {
                answer: APOLOGY.to_string(),
                method: None,
                decision,
            },
        }
    }

    fn fallback_step(&mut self, question: &str, reason: &str, history: &str) -> State {
        let prompt = prompts::fallback(question, history);
        match self.generate(&prompt, SamplingOptions::general(), SafetyMode::Permissive) {
            Ok(answer) => State::Done {
                answer,
                method: Some(AnswerMethod::FallbackGeneralKnowledge),
                decision: RoutingDecision::new(RouteKind::Fallback, reason),
            },
            Err(decision) => State::Done {
                answer: APOLOGY.to_string(),
                method: None,
                decision,
            },
        }
    }

    /// Grounded pass, general-knowledge pass, then a synthesis call that
    /// merges both with priority to catalog facts.
    fn augment_step(&mut self, question: &str, context: String, history: &str) -> State {
        let grounded = self.generate(
            &prompts::grounded(question, &context, history),
            SamplingOptions::grounded(),
            SafetyMode::Standard,
        );
        let general = self.generate(
            &prompts::general_knowledge(question),
            SamplingOptions::general(),
            SafetyMode::Permissive,
        );
        let merged = match (grounded, general) {
            (Ok(grounded), Ok(general)) => self.generate(
                &prompts::synthesis(question, &grounded, &general),
                SamplingOptions::general(),
                SafetyMode::Standard,
            ),
            (Err(decision), _) | (_, Err(decision)) => Err(decision),
        };
        match merged {
            Ok(answer) => State::Done {
                answer,
                method: Some(AnswerMethod::AugmentedResponse),
                decision: RoutingDecision::new(
                    RouteKind::Augmented,
                    "grounded and general answers synthesized",
                ),
            },
            Err(decision) => State::Done {
                answer: APOLOGY.to_string(),
                method: None,
                decision,
            },
        }
    }

    fn generate(
        &self,
        prompt: &str,
        sampling: SamplingOptions,
        safety: SafetyMode,
    ) -> Result<String, RoutingDecision> {
        self.retry
            .run("generation", || {
                self.generation.generate(prompt, &sampling, safety)
            })
            .map_err(|e| {
                warn!(error = %e, "generation failed after retries");
                RoutingDecision::new(RouteKind::Error, e.to_string())
            })
    }

    pub fn last_method(&self) -> Option<AnswerMethod> {
        self.last_method
    }

    pub fn last_decision(&self) -> Option<&RoutingDecision> {
        self.last_decision.as_ref()
    }

    pub fn stats(&self) -> PipelineStats {
        self.analyzer.stats().snapshot()
    }

    pub fn clear_cache(&mut self) {
        self.analyzer.clear_cache();
    }

    /// Drain the accumulated degradation log.
    pub fn drain_degradation_events(&mut self) -> Vec<DegradationEvent> {
        std::mem::take(&mut self.degradations)
    }
}
