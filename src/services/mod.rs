// Service exports
pub mod cache;
pub mod embedding;
pub mod engine;
pub mod store;

pub use cache::{pool_version, MatchCache, MatchKey};
pub use embedding::{EmbeddingClient, EmbeddingError};
pub use engine::{EngineError, MatchEngine};
pub use store::{StoreClient, StoreError};
