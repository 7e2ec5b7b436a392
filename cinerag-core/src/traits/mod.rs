//! Capability contracts for the external collaborators. Concrete
//! technology (the model service, the vector store, the graph database)
//! lives behind these; the pipeline never sees anything wider.

mod embedding;
mod generation;
mod graph_store;
mod vector_store;

pub use embedding::{EmbeddingTask, IEmbeddingService};
pub use generation::{IGenerationService, SafetyMode, SamplingOptions};
pub use graph_store::{IGraphStore, NodeLookup};
pub use vector_store::IVectorStore;
