use serde::{Deserialize, Serialize};

/// How the terminal answer was produced. Exposed for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMethod {
    BasicRetrieval,
    AdvancedRetrieval,
    FallbackGeneralKnowledge,
    AugmentedResponse,
}

impl AnswerMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerMethod::BasicRetrieval => "basic_retrieval",
            AnswerMethod::AdvancedRetrieval => "advanced_retrieval",
            AnswerMethod::FallbackGeneralKnowledge => "fallback_general_knowledge",
            AnswerMethod::AugmentedResponse => "augmented_response",
        }
    }
}

/// Terminal routing outcome for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Grounded,
    Fallback,
    Augmented,
    Error,
}

/// Produced once per query; drives the terminal response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub kind: RouteKind,
    pub reason: String,
}

impl RoutingDecision {
    pub fn new(kind: RouteKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Speaker role in the chat history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of conversation history handed to `query()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Coarse query category, when the caller knows it (e.g. from an
/// evaluation dataset). Feeds the depth-prediction fallback table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    SpecificFact,
    GenreRecommendation,
    SimilaritySearch,
    DirectorFilmography,
    ActorFilmography,
    Disambiguation,
    Comparison,
}

impl QueryCategory {
    /// Category → traversal depth, in hops.
    pub fn default_depth(self) -> u32 {
        match self {
            QueryCategory::SpecificFact => 1,
            QueryCategory::GenreRecommendation
            | QueryCategory::SimilaritySearch
            | QueryCategory::DirectorFilmography
            | QueryCategory::ActorFilmography
            | QueryCategory::Disambiguation => 2,
            QueryCategory::Comparison => 3,
        }
    }
}

/// Optional caller-supplied hints for one retrieval pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalHints {
    pub category: Option<QueryCategory>,
}
