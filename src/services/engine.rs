use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::core::{normalize, IncompatiblePairError, Ranker, ValidationError};
use crate::models::{
    ApplicantRow, EntityType, InvestorMatchRow, MatchResult, MatchableEntity, RawRecord,
    StartupMatchRow, TalentMatchRow,
};
use crate::services::cache::{pool_version, MatchCache, MatchKey};
use crate::services::embedding::{EmbeddingClient, EmbeddingError};
use crate::services::store::{StoreClient, StoreError};

/// Failures surfaced by an engine operation
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    IncompatiblePair(#[from] IncompatiblePairError),

    /// Error propagated out of a shared in-flight cache computation
    #[error("{0}")]
    Shared(Arc<EngineError>),
}

impl EngineError {
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::Store(StoreError::NotFound(_)) => 404,
            EngineError::Store(_) => 502,
            EngineError::Validation(_) => 422,
            EngineError::IncompatiblePair(_) => 400,
            EngineError::Shared(inner) => inner.status_code(),
        }
    }
}

/// Asynchronous front of the scoring pipeline
///
/// Owns the collaborator clients and the result cache; the scoring
/// itself stays in the pure `core` modules. One engine instance is
/// shared across all request handlers.
pub struct MatchEngine {
    store: Arc<StoreClient>,
    embeddings: Arc<EmbeddingClient>,
    cache: MatchCache,
    ranker: Ranker,
    embed_concurrency: usize,
}

impl MatchEngine {
    pub fn new(
        store: Arc<StoreClient>,
        embeddings: Arc<EmbeddingClient>,
        cache: MatchCache,
        ranker: Ranker,
        embed_concurrency: usize,
    ) -> Self {
        Self {
            store,
            embeddings,
            cache,
            ranker,
            embed_concurrency: embed_concurrency.max(1),
        }
    }

    /// Investors ranked for a founder's startup
    pub async fn matches_for_startup(
        &self,
        startup_id: &str,
        threshold: u8,
    ) -> Result<Vec<InvestorMatchRow>, EngineError> {
        let (results, display) = self
            .ranked_matches(startup_id, EntityType::Investor, threshold)
            .await?;

        let rows = results
            .iter()
            .map(|r| {
                let (name, fund) = match display.get(&r.candidate_id) {
                    Some(RawRecord::Investor(inv)) => {
                        (inv.name.clone().unwrap_or_default(), inv.fund.clone())
                    }
                    _ => (String::new(), None),
                };
                InvestorMatchRow {
                    investor_id: r.candidate_id.clone(),
                    name,
                    fund,
                    match_percentage: r.match_percentage,
                    score_breakdown: (&r.breakdown).into(),
                }
            })
            .collect();

        Ok(rows)
    }

    /// Startups ranked for an investor's deal-flow feed
    pub async fn matches_for_investor(
        &self,
        investor_id: &str,
        threshold: u8,
    ) -> Result<Vec<StartupMatchRow>, EngineError> {
        let (results, display) = self
            .ranked_matches(investor_id, EntityType::Startup, threshold)
            .await?;

        let rows = results
            .iter()
            .map(|r| {
                let (name, tagline) = match display.get(&r.candidate_id) {
                    Some(RawRecord::Startup(s)) => {
                        (s.name.clone().unwrap_or_default(), s.tagline.clone())
                    }
                    _ => (String::new(), None),
                };
                StartupMatchRow {
                    startup_id: r.candidate_id.clone(),
                    name,
                    tagline,
                    match_percentage: r.match_percentage,
                    score_breakdown: (&r.breakdown).into(),
                }
            })
            .collect();

        Ok(rows)
    }

    /// Talent ranked for one job posting
    pub async fn matches_for_job(
        &self,
        job_id: &str,
        threshold: u8,
    ) -> Result<Vec<TalentMatchRow>, EngineError> {
        let (results, display) = self
            .ranked_matches(job_id, EntityType::Talent, threshold)
            .await?;

        let rows = results
            .iter()
            .map(|r| {
                let (name, headline) = match display.get(&r.candidate_id) {
                    Some(RawRecord::Talent(t)) => {
                        (t.name.clone().unwrap_or_default(), t.headline.clone())
                    }
                    _ => (String::new(), None),
                };
                TalentMatchRow {
                    talent_id: r.candidate_id.clone(),
                    name,
                    headline,
                    match_percentage: r.match_percentage,
                    matched_skills: r.matched_skills.iter().cloned().collect(),
                    missing_skills: r.missing_skills.iter().cloned().collect(),
                }
            })
            .collect();

        Ok(rows)
    }

    /// Applicant list for a job: a store pass-through, never scored
    pub async fn job_applicants(&self, job_id: &str) -> Result<Vec<ApplicantRow>, EngineError> {
        let applicants = self.store.list_applicants(job_id).await?;
        Ok(applicants
            .into_iter()
            .map(|a| ApplicantRow {
                match_id: a.match_id,
                name: a.name.unwrap_or_default(),
                headline: a.headline,
                message: a.message,
            })
            .collect())
    }

    /// Drop cached rankings for a subject after a profile or thesis edit
    pub fn invalidate_subject(&self, subject_id: &str) {
        self.cache.invalidate_subject(subject_id);
    }

    /// Fetch, version, score (or reuse) and threshold-filter one pool
    async fn ranked_matches(
        &self,
        subject_id: &str,
        pool_type: EntityType,
        threshold: u8,
    ) -> Result<(Vec<MatchResult>, HashMap<String, RawRecord>), EngineError> {
        let subject_raw = self.store.get_record(subject_id).await?;
        let subject = normalize(&subject_raw)?;

        if subject.entity_type.counterpart() != Some(pool_type) {
            return Err(IncompatiblePairError {
                subject: subject.entity_type,
                candidate: pool_type,
            }
            .into());
        }

        let pool_raw = self.store.list_pool(pool_type, None).await?;
        let key = MatchKey {
            subject_id: subject.id.clone(),
            pool_version: pool_version(&subject_raw, &pool_raw),
        };

        tracing::debug!(
            "Ranking {} candidates for subject {} (pool version {})",
            pool_raw.len(),
            subject_id,
            key.pool_version
        );

        let ranked = self
            .cache
            .get_or_compute(key, self.compute_rankings(subject, &pool_raw))
            .await
            .map_err(EngineError::Shared)?;

        // The cache holds the unfiltered ranking; the display threshold
        // is applied per read so every page shares one rule.
        let filtered: Vec<MatchResult> = ranked
            .iter()
            .filter(|r| r.match_percentage > threshold)
            .cloned()
            .collect();

        let display: HashMap<String, RawRecord> = pool_raw
            .into_iter()
            .map(|r| (r.id().to_string(), r))
            .collect();

        Ok((filtered, display))
    }

    /// Cache-miss path: normalize the pool, resolve embeddings, rank
    async fn compute_rankings(
        &self,
        mut subject: MatchableEntity,
        pool_raw: &[RawRecord],
    ) -> Result<Vec<MatchResult>, EngineError> {
        let mut candidates: Vec<MatchableEntity> = pool_raw
            .iter()
            .filter_map(|record| match normalize(record) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    tracing::warn!("Excluding invalid pool record {:?}: {}", record.id(), e);
                    None
                }
            })
            .collect();

        if subject.embedding.is_none() && !subject.text_blob.trim().is_empty() {
            match self.embeddings.embed(&subject.text_blob).await {
                Ok(vector) => subject.embedding = Some(vector),
                Err(e) => {
                    tracing::warn!("Embedding unavailable for subject {}: {}", subject.id, e);
                }
            }
        }

        self.resolve_embeddings(&mut candidates).await;

        let results = self.ranker.rank(&subject, &candidates, 0)?;
        tracing::info!(
            "Scored {} candidates for subject {}, {} above zero",
            candidates.len(),
            subject.id,
            results.len()
        );
        Ok(results)
    }

    /// Fan embedding calls out over a bounded worker pool
    ///
    /// Each pair is independently scorable once both embeddings exist,
    /// so this is the only awaited fan-out; the ranker's sort is the
    /// fan-in barrier. A failed embedding leaves that entity's semantic
    /// sub-score undefined.
    async fn resolve_embeddings(&self, entities: &mut [MatchableEntity]) {
        let semaphore = Arc::new(Semaphore::new(self.embed_concurrency));
        let mut tasks = JoinSet::new();

        for (idx, entity) in entities.iter().enumerate() {
            if entity.embedding.is_some() || entity.text_blob.trim().is_empty() {
                continue;
            }
            let text = entity.text_blob.clone();
            let client = self.embeddings.clone();
            let semaphore = semaphore.clone();
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (
                            idx,
                            Err(EmbeddingError::Unavailable("worker pool closed".into())),
                        )
                    }
                };
                let outcome = client.embed(&text).await;
                (idx, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, Ok(vector))) => entities[idx].embedding = Some(vector),
                Ok((idx, Err(e))) => {
                    tracing::warn!("Embedding unavailable for {}: {}", entities[idx].id, e);
                }
                Err(e) => tracing::warn!("Embedding task panicked: {}", e),
            }
        }
    }
}
