//! NepLaunch Match - hybrid match-scoring engine for the NepLaunch
//! startup marketplace
//!
//! Ranks founders against investors and talent against job postings by
//! combining free-text semantic similarity with structured attribute
//! rules, behind a per-key invalidating result cache.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize, IncompatiblePairError, Ranker, ValidationError};
pub use crate::models::{EntityType, MatchResult, MatchableEntity, ScoreBreakdown, ScoringWeights};
