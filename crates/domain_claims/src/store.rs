//! Persistence funnel for claim aggregates
//!
//! Every load and save of a claim goes through [`ClaimStore`]. Loading
//! rejects malformed identifiers before any storage lookup; saving runs the
//! pre-save hook ([`Claim::before_save`]) so the total amount always
//! reflects the damages that were touched.

use std::sync::Arc;

use core_kernel::{ClaimId, HealthCheckResult};
use tracing::debug;

use crate::claim::Claim;
use crate::error::ClaimError;
use crate::ports::ClaimRepository;

#[derive(Clone)]
pub struct ClaimStore {
    repository: Arc<dyn ClaimRepository>,
}

impl ClaimStore {
    pub fn new(repository: Arc<dyn ClaimRepository>) -> Self {
        Self { repository }
    }

    /// Parses a raw claim id; malformed ids count as not found
    pub fn parse_id(raw_id: &str) -> Result<ClaimId, ClaimError> {
        raw_id.parse().map_err(|_| ClaimError::MalformedId {
            entity: ClaimId::entity(),
            value: raw_id.to_string(),
        })
    }

    /// Loads a claim by its raw identifier
    pub async fn load(&self, raw_id: &str) -> Result<Claim, ClaimError> {
        let id = Self::parse_id(raw_id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClaimError::ClaimNotFound(id.to_string()))
    }

    pub async fn load_all(&self) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.repository.find_all().await?)
    }

    /// Runs the pre-save hook, persists the claim and returns the stored state
    ///
    /// A failing hook leaves storage untouched.
    pub async fn save(&self, mut claim: Claim) -> Result<Claim, ClaimError> {
        let recomputed = claim.damages_touched();
        claim.before_save()?;
        self.repository.save(&claim).await?;
        claim.mark_saved();

        debug!(
            claim_id = %claim.id,
            recomputed,
            total_amount = %claim.total_amount,
            "Claim saved"
        );
        Ok(claim)
    }

    pub async fn health_check(&self) -> HealthCheckResult {
        self.repository.health_check().await
    }
}

impl std::fmt::Debug for ClaimStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimStore").finish_non_exhaustive()
    }
}
