use std::collections::hash_map::DefaultHasher;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::models::{MatchResult, RawRecord};

/// Cache key: one ranked result list per subject and pool generation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub subject_id: String,
    pub pool_version: u64,
}

/// Memoized ranked-match store with per-key single-flight
///
/// Backed by `moka`: concurrent readers of the same key attach to the
/// one in-flight computation instead of recomputing, and a failed
/// computation is never cached, so the next read retries. There is no
/// TTL — entries die by explicit invalidation or because a profile or
/// pool edit moved the pool version, so fresh matches show up on the
/// very next read after an edit.
pub struct MatchCache {
    inner: moka::future::Cache<MatchKey, Arc<Vec<MatchResult>>>,
}

impl MatchCache {
    pub fn new(capacity: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(capacity)
            .support_invalidation_closures()
            .build();

        Self { inner }
    }

    /// Fetch the ranked results for a key, computing them at most once
    /// concurrently per key
    pub async fn get_or_compute<F, E>(
        &self,
        key: MatchKey,
        init: F,
    ) -> Result<Arc<Vec<MatchResult>>, Arc<E>>
    where
        F: Future<Output = Result<Vec<MatchResult>, E>>,
        E: Send + Sync + 'static,
    {
        self.inner
            .try_get_with(key, async move { init.await.map(Arc::new) })
            .await
    }

    /// Drop one exact key
    pub async fn invalidate(&self, key: &MatchKey) {
        self.inner.invalidate(key).await;
        tracing::debug!("Invalidated cache key for subject {}", key.subject_id);
    }

    /// Drop every cached ranking for a subject, across pool versions.
    /// Called from the profile-edit hook.
    pub fn invalidate_subject(&self, subject_id: &str) {
        let subject_id = subject_id.to_string();
        let logged = subject_id.clone();
        if let Err(e) = self
            .inner
            .invalidate_entries_if(move |key, _| key.subject_id == subject_id)
        {
            tracing::warn!("Failed to invalidate entries for {}: {}", logged, e);
        } else {
            tracing::debug!("Invalidated all cached rankings for subject {}", logged);
        }
    }

    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

/// Content hash over the subject record and the pool listing
///
/// Covers ids, membership and `updated_at` stamps, so editing any
/// candidate, the subject, or pool membership moves the version and
/// strands stale entries without an explicit invalidation call.
pub fn pool_version(subject: &RawRecord, pool: &[RawRecord]) -> u64 {
    let mut hasher = DefaultHasher::new();
    subject.id().hash(&mut hasher);
    subject.updated_at().hash(&mut hasher);
    pool.len().hash(&mut hasher);
    for record in pool {
        record.id().hash(&mut hasher);
        record.updated_at().hash(&mut hasher);
    }
    hasher.finish()
}
