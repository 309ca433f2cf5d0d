use thiserror::Error;

use crate::core::{aggregate::aggregate, scoring, semantic::semantic_score};
use crate::models::{EntityType, MatchResult, MatchableEntity, ScoreBreakdown, ScoringWeights};

/// Raised when two entity types cannot be ranked against each other
#[derive(Debug, Error)]
#[error("cannot match {subject} against {candidate}")]
pub struct IncompatiblePairError {
    pub subject: EntityType,
    pub candidate: EntityType,
}

/// Scores a candidate pool against one subject and returns an ordered
/// result set
///
/// Pure and side-effect free: callers own pool fetching, embedding
/// resolution and caching. Results below or at the display threshold
/// are dropped, the rest sorted by percentage descending with candidate
/// id as the deterministic tie-break.
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score a single subject/candidate pair
    pub fn score_pair(
        &self,
        subject: &MatchableEntity,
        candidate: &MatchableEntity,
    ) -> Result<MatchResult, IncompatiblePairError> {
        if subject.entity_type.counterpart() != Some(candidate.entity_type) {
            return Err(IncompatiblePairError {
                subject: subject.entity_type,
                candidate: candidate.entity_type,
            });
        }

        let (skill_score, matched_skills, missing_skills) =
            scoring::skill_overlap(&subject.skills, &candidate.skills);

        let breakdown = ScoreBreakdown {
            semantic: semantic_score(subject.embedding.as_deref(), candidate.embedding.as_deref()),
            industry_stage: scoring::industry_stage(subject, candidate),
            skill_overlap: skill_score,
            numeric_fit: scoring::numeric_fit(subject.check_size_range, candidate.check_size_range),
        };

        let match_percentage = aggregate(&breakdown, &self.weights);

        Ok(MatchResult {
            subject_id: subject.id.clone(),
            candidate_id: candidate.id.clone(),
            match_percentage,
            breakdown,
            matched_skills,
            missing_skills,
        })
    }

    /// Rank a candidate pool for one subject
    ///
    /// Every candidate must be of the subject's counterpart type; a
    /// stray incompatible candidate fails the whole pairing request.
    pub fn rank(
        &self,
        subject: &MatchableEntity,
        candidates: &[MatchableEntity],
        threshold: u8,
    ) -> Result<Vec<MatchResult>, IncompatiblePairError> {
        let mut results = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let result = self.score_pair(subject, candidate)?;
            if result.match_percentage > threshold {
                results.push(result);
            }
        }

        results.sort_by(|a, b| {
            b.match_percentage
                .cmp(&a.match_percentage)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });

        Ok(results)
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
