use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Role of an entity inside the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Startup,
    Talent,
    Investor,
    Job,
}

impl EntityType {
    /// The entity type this one can be ranked against, if any.
    ///
    /// Startups raise from investors, jobs hire talent. Every other
    /// pairing is rejected by the ranker.
    pub fn counterpart(&self) -> Option<EntityType> {
        match self {
            EntityType::Startup => Some(EntityType::Investor),
            EntityType::Investor => Some(EntityType::Startup),
            EntityType::Job => Some(EntityType::Talent),
            EntityType::Talent => Some(EntityType::Job),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityType::Startup => "STARTUP",
            EntityType::Talent => "TALENT",
            EntityType::Investor => "INVESTOR",
            EntityType::Job => "JOB",
        };
        f.write_str(s)
    }
}

/// Canonical scoring view of a profile or job record
///
/// Produced by the normalizer; immutable once scored for a given cache
/// generation. Skills are lower-cased and deduplicated (set semantics),
/// and missing attributes stay `None` so the structured scorer can tell
/// "unknown" apart from "mismatch".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchableEntity {
    pub id: String,
    pub entity_type: EntityType,
    pub skills: BTreeSet<String>,
    pub industry: Option<String>,
    pub stage: Option<String>,
    pub investor_type: Option<String>,
    pub geography: Option<String>,
    /// Investor check size, or a degenerate (goal, goal) range for startups
    pub check_size_range: Option<(f64, f64)>,
    pub text_blob: String,
    pub embedding: Option<Vec<f32>>,
}

/// Per-signal sub-scores behind one match percentage
///
/// `semantic` and `numeric_fit` are `None` when the signal is undefined
/// (no embedding, or one side has no numeric range); the aggregator
/// renormalizes the remaining weights instead of treating them as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub semantic: Option<f64>,
    pub industry_stage: f64,
    pub skill_overlap: f64,
    pub numeric_fit: Option<f64>,
}

/// One scored subject/candidate pairing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub subject_id: String,
    pub candidate_id: String,
    pub match_percentage: u8,
    pub breakdown: ScoreBreakdown,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
}

/// Aggregation weights over the sub-scores
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub semantic: f64,
    pub skills: f64,
    pub industry_stage: f64,
    pub numeric: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            semantic: 0.50,
            skills: 0.30,
            industry_stage: 0.15,
            numeric: 0.05,
        }
    }
}
