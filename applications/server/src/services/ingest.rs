/// Ingestion service - pulls users from the upstream source into the store
use crate::{
    error::{Result, ServerError},
    observe::{self, Operation, Thresholds},
};
use rollcall_core::UserSource;
use rollcall_storage::UserStore;
use std::sync::Arc;

/// How a requested batch size turns into an upstream request size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountPolicy {
    /// Used when no count, or a non-positive one, is requested
    pub default_count: u32,
    /// Larger requests are clamped down to this
    pub max_count: u32,
}

impl CountPolicy {
    /// Resolve a requested count. Never rejects; always in `1..=max_count`.
    pub fn resolve(&self, requested: Option<i64>) -> u32 {
        let max = self.max_count.max(1);
        match requested {
            Some(n) if n > 0 => n.min(i64::from(max)) as u32,
            _ => self.default_count.clamp(1, max),
        }
    }
}

impl Default for CountPolicy {
    fn default() -> Self {
        Self {
            default_count: 10,
            max_count: 5000,
        }
    }
}

/// Fetch-then-insert workflow.
///
/// Inserts are fail-fast: the first failing insert aborts the rest of the
/// batch. Rows stored before the failure stay committed.
pub struct Ingestor {
    store: UserStore,
    source: Arc<dyn UserSource>,
    policy: CountPolicy,
    thresholds: Thresholds,
}

impl Ingestor {
    pub fn new(
        store: UserStore,
        source: Arc<dyn UserSource>,
        policy: CountPolicy,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            store,
            source,
            policy,
            thresholds,
        }
    }

    /// Fetch a batch and store it, returning how many rows were inserted
    pub async fn ingest(&self, requested: Option<i64>) -> Result<usize> {
        let count = self.policy.resolve(requested);
        observe::timed(Operation::FetchUsers, &self.thresholds, self.fetch_and_store(count)).await
    }

    async fn fetch_and_store(&self, count: u32) -> Result<usize> {
        let users = self.source.fetch_users(count).await?;
        let fetched = users.len();

        let mut stored = 0;
        for user in &users {
            observe::timed(
                Operation::InsertUser,
                &self.thresholds,
                self.store.insert(user),
            )
            .await
            .map_err(|source| ServerError::BatchAborted {
                stored,
                skipped: fetched - stored,
                source,
            })?;
            stored += 1;
        }

        tracing::info!(requested = count, stored, "Stored fetched users");
        Ok(stored)
    }
}
