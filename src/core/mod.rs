// Core scoring pipeline exports
pub mod aggregate;
pub mod normalizer;
pub mod ranker;
pub mod scoring;
pub mod semantic;

pub use aggregate::aggregate;
pub use normalizer::{normalize, ValidationError};
pub use ranker::{IncompatiblePairError, Ranker};
pub use scoring::{industry_stage, numeric_fit, skill_overlap};
pub use semantic::{cosine_similarity, semantic_score};
