//! Claims Domain Ports
//!
//! The `ClaimRepository` trait is everything the claims domain needs from
//! storage. A claim and its damages are loaded and saved as one unit.
//!
//! - **PostgreSQL Adapter**: `infra_db::PgClaimRepository`
//! - **In-memory Adapter**: [`memory::InMemoryClaimRepository`], behind the
//!   `in-memory` feature, for tests and local runs
//!
//! ```rust,ignore
//! let repository: Arc<dyn ClaimRepository> = match config.store {
//!     ClaimStoreKind::Postgres => Arc::new(PgClaimRepository::new(pool)),
//!     ClaimStoreKind::Memory => Arc::new(InMemoryClaimRepository::new()),
//! };
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::claim::Claim;

/// Storage port for claim aggregates
///
/// Implementations persist whatever state they are given. Recomputing the
/// total and timestamps happens before `save` is called, in
/// [`crate::store::ClaimStore`].
#[async_trait]
pub trait ClaimRepository: DomainPort + HealthCheckable {
    /// Loads a claim with its damages
    async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Loads every claim, oldest first
    async fn find_all(&self) -> Result<Vec<Claim>, PortError>;

    /// Inserts or replaces the whole claim document
    async fn save(&self, claim: &Claim) -> Result<(), PortError>;
}

/// In-memory implementation of ClaimRepository
///
/// Stores claims in a map guarded by an async lock. Useful for unit testing
/// without a database, and for running the API locally.
#[cfg(any(test, feature = "in-memory"))]
pub mod memory {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Default)]
    pub struct InMemoryClaimRepository {
        claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
        lookups: AtomicUsize,
    }

    impl InMemoryClaimRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with claims, stored as given
        pub fn with_claims(claims: Vec<Claim>) -> Self {
            let stored = claims
                .into_iter()
                .map(|mut claim| {
                    claim.mark_saved();
                    (claim.id, claim)
                })
                .collect();
            Self {
                claims: Arc::new(RwLock::new(stored)),
                lookups: AtomicUsize::new(0),
            }
        }

        /// Number of `find_by_id` calls served so far
        pub fn lookup_count(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.claims.read().await.is_empty()
        }
    }

    impl DomainPort for InMemoryClaimRepository {}

    #[async_trait]
    impl HealthCheckable for InMemoryClaimRepository {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-claims".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("In-memory store always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimRepository for InMemoryClaimRepository {
        async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.claims.read().await.get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Claim>, PortError> {
            let mut claims: Vec<Claim> = self.claims.read().await.values().cloned().collect();
            claims.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            Ok(claims)
        }

        async fn save(&self, claim: &Claim) -> Result<(), PortError> {
            let mut stored = claim.clone();
            stored.mark_saved();
            self.claims.write().await.insert(stored.id, stored);
            Ok(())
        }
    }
}
