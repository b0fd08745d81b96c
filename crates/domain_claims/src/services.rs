//! Claims domain services
//!
//! `ClaimService` owns the claim-level operations and the finish rules.
//! `DamageService` owns the damage sub-operations. Both load the aggregate,
//! check a guard, mutate it and persist it through the [`ClaimStore`]; nothing
//! is written when a guard fails.

use tracing::{debug, info, warn};

use core_kernel::DamageId;
use crate::claim::{Claim, ClaimPatch, NewClaim};
use crate::damage::{DamagePatch, NewDamage};
use crate::error::ClaimError;
use crate::finish_rules::FinishRules;
use crate::store::ClaimStore;

/// Service for creating, reading and updating claims
#[derive(Debug)]
pub struct ClaimService {
    store: ClaimStore,
    finish_rules: FinishRules,
}

impl ClaimService {
    /// Creates a claim service with the standard finish rules
    pub fn new(store: ClaimStore) -> Self {
        Self {
            store,
            finish_rules: FinishRules::standard(),
        }
    }

    /// Replaces the rules evaluated before a claim is finished
    pub fn with_finish_rules(mut self, finish_rules: FinishRules) -> Self {
        self.finish_rules = finish_rules;
        self
    }

    /// Opens a pending claim; the total covers any initial damages
    pub async fn create(&self, new_claim: NewClaim) -> Result<Claim, ClaimError> {
        let claim = self.store.save(Claim::open(new_claim)?).await?;

        info!(
            claim_id = %claim.id,
            damages = claim.damages().len(),
            total_amount = %claim.total_amount,
            "Claim created"
        );
        Ok(claim)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Claim, ClaimError> {
        self.store.load(id).await
    }

    pub async fn list(&self) -> Result<Vec<Claim>, ClaimError> {
        self.store.load_all().await
    }

    /// Applies a partial update to a claim
    ///
    /// Finished claims are immutable. When the patch finishes the claim, the
    /// finish rules run against the claim as loaded, before any field of the
    /// patch is applied. A supplied `total_amount` is stored as given.
    pub async fn update(&self, id: &str, patch: ClaimPatch) -> Result<Claim, ClaimError> {
        let mut claim = self.store.load(id).await?;

        if let Err(err) = claim.ensure_mutable() {
            warn!(claim_id = %claim.id, "Rejected update of a finished claim");
            return Err(err);
        }

        if patch.finishes() {
            if let Err(err) = self.finish_rules.evaluate(&claim) {
                warn!(claim_id = %claim.id, error = %err, "Claim cannot be finished");
                return Err(err);
            }
        }

        if let Some(total_amount) = patch.total_amount {
            let damage_total = claim.damage_total()?;
            if total_amount != damage_total {
                warn!(
                    claim_id = %claim.id,
                    %total_amount,
                    %damage_total,
                    "Supplied total amount differs from the sum of damage prices"
                );
            }
        }

        let previous_status = claim.status;
        claim.apply_patch(patch);
        let claim = self.store.save(claim).await?;

        info!(
            claim_id = %claim.id,
            from = %previous_status,
            to = %claim.status,
            "Claim updated"
        );
        Ok(claim)
    }
}

/// Service for managing the damages of a pending claim
#[derive(Debug)]
pub struct DamageService {
    store: ClaimStore,
}

impl DamageService {
    pub fn new(store: ClaimStore) -> Self {
        Self { store }
    }

    /// Appends a damage with a server-assigned id
    pub async fn add_damage(&self, claim_id: &str, new_damage: NewDamage) -> Result<Claim, ClaimError> {
        let mut claim = self.load_editable(claim_id).await?;
        let damage_id = claim.add_damage(new_damage)?;
        let claim = self.store.save(claim).await?;

        info!(claim_id = %claim.id, %damage_id, total_amount = %claim.total_amount, "Damage added");
        Ok(claim)
    }

    /// Applies a partial update to one damage
    pub async fn update_damage(
        &self,
        claim_id: &str,
        damage_id: &str,
        patch: DamagePatch,
    ) -> Result<Claim, ClaimError> {
        let mut claim = self.load_editable(claim_id).await?;
        let damage_id = parse_damage_id(&claim, damage_id)?;
        if patch.is_empty() {
            debug!(claim_id = %claim.id, %damage_id, "Damage update carries no fields");
        }
        claim.update_damage(damage_id, patch)?;
        let claim = self.store.save(claim).await?;

        info!(claim_id = %claim.id, %damage_id, total_amount = %claim.total_amount, "Damage updated");
        Ok(claim)
    }

    pub async fn delete_damage(&self, claim_id: &str, damage_id: &str) -> Result<Claim, ClaimError> {
        let mut claim = self.load_editable(claim_id).await?;
        let damage_id = parse_damage_id(&claim, damage_id)?;
        claim.remove_damage(damage_id)?;
        let claim = self.store.save(claim).await?;

        info!(claim_id = %claim.id, %damage_id, total_amount = %claim.total_amount, "Damage deleted");
        Ok(claim)
    }

    async fn load_editable(&self, claim_id: &str) -> Result<Claim, ClaimError> {
        let claim = self.store.load(claim_id).await?;
        if let Err(err) = claim.ensure_damages_editable() {
            warn!(claim_id = %claim.id, status = %claim.status, "Rejected damage change");
            return Err(err);
        }
        Ok(claim)
    }
}

fn parse_damage_id(claim: &Claim, raw_id: &str) -> Result<DamageId, ClaimError> {
    raw_id.parse().map_err(|_| ClaimError::DamageNotFound {
        claim_id: claim.id.to_string(),
        damage_id: raw_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimStatus;
    use crate::damage::DamageSeverity;
    use crate::ports::memory::InMemoryClaimRepository;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn services() -> (ClaimService, DamageService) {
        let store = ClaimStore::new(Arc::new(InMemoryClaimRepository::new()));
        (ClaimService::new(store.clone()), DamageService::new(store))
    }

    fn new_claim() -> NewClaim {
        NewClaim {
            title: "Test Claim".to_string(),
            description: "A description".to_string(),
            damages: vec![NewDamage::new("Bumper", DamageSeverity::Low, "http://img.com", dec!(100))],
        }
    }

    #[tokio::test]
    async fn test_update_leaves_omitted_fields() {
        let (claims, _) = services();
        let claim = claims.create(new_claim()).await.unwrap();

        let updated = claims
            .update(
                &claim.id.to_string(),
                ClaimPatch {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, "A description");
        assert_eq!(updated.status, ClaimStatus::Pending);
        assert_eq!(updated.total_amount, dec!(100));
    }

    #[tokio::test]
    async fn test_damage_service_rejects_in_review_claim() {
        let (claims, damages) = services();
        let claim = claims.create(new_claim()).await.unwrap();
        let id = claim.id.to_string();
        claims
            .update(&id, ClaimPatch { status: Some(ClaimStatus::InReview), ..Default::default() })
            .await
            .unwrap();

        let result = damages
            .add_damage(&id, NewDamage::new("Door", DamageSeverity::Mid, "http://img.com", dec!(5)))
            .await;
        assert!(matches!(result, Err(ClaimError::DamagesLocked(ClaimStatus::InReview))));
    }

    #[tokio::test]
    async fn test_malformed_damage_id_is_not_found() {
        let (claims, damages) = services();
        let claim = claims.create(new_claim()).await.unwrap();

        let err = damages
            .delete_damage(&claim.id.to_string(), "damage123")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
