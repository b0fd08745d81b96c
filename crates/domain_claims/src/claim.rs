//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, DamageId};
use crate::damage::{Damage, DamagePatch, DamageSeverity, NewDamage};
use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Newly reported; the only status in which damages may change
    #[default]
    Pending,
    /// Being reviewed
    InReview,
    /// Closed for good
    Finished,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::InReview => "IN_REVIEW",
            ClaimStatus::Finished => "FINISHED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Finished)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ClaimStatus::Pending),
            "IN_REVIEW" => Ok(ClaimStatus::InReview),
            "FINISHED" => Ok(ClaimStatus::Finished),
            other => Err(ClaimError::validation(format!("Unknown claim status: {}", other))),
        }
    }
}

/// Data for opening a claim
#[derive(Debug, Clone, Default)]
pub struct NewClaim {
    pub title: String,
    pub description: String,
    pub damages: Vec<NewDamage>,
}

/// Partial update of a claim; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct ClaimPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ClaimStatus>,
    pub total_amount: Option<Decimal>,
}

impl ClaimPatch {
    pub fn finishes(&self) -> bool {
        self.status == Some(ClaimStatus::Finished)
    }
}

/// An insurance claim and the damages it reports
///
/// `total_amount` is derived from the damages. The damages list is only
/// reachable through methods that mark it as touched, and
/// [`Claim::before_save`] recomputes the total only when that mark is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Short summary
    pub title: String,
    /// Free-text account of the incident
    pub description: String,
    /// Lifecycle status
    pub status: ClaimStatus,
    /// Sum of damage prices as of the last save
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    damages: Vec<Damage>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    damages_touched: bool,
}

impl Claim {
    /// Opens a new pending claim with its initial damages
    pub fn open(new_claim: NewClaim) -> Result<Self, ClaimError> {
        let damages = new_claim
            .damages
            .into_iter()
            .map(NewDamage::into_damage)
            .collect::<Result<Vec<_>, _>>()?;
        let now = Utc::now();

        Ok(Self {
            id: ClaimId::new(),
            title: new_claim.title,
            description: new_claim.description,
            status: ClaimStatus::Pending,
            total_amount: Decimal::ZERO,
            damages,
            created_at: now,
            updated_at: now,
            damages_touched: true,
        })
    }

    /// Rebuilds a claim from persisted state
    ///
    /// A restored claim counts as unmodified, so its stored total survives
    /// a save that does not touch the damages.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ClaimId,
        title: String,
        description: String,
        status: ClaimStatus,
        total_amount: Decimal,
        damages: Vec<Damage>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            status,
            total_amount,
            damages,
            created_at,
            updated_at,
            damages_touched: false,
        }
    }

    pub fn damages(&self) -> &[Damage] {
        &self.damages
    }

    pub fn damage(&self, damage_id: DamageId) -> Option<&Damage> {
        self.damages.iter().find(|d| d.id == damage_id)
    }

    /// Whether the damages changed since the claim was loaded or saved
    pub fn damages_touched(&self) -> bool {
        self.damages_touched
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn has_damage_with_severity(&self, severity: DamageSeverity) -> bool {
        self.damages.iter().any(|d| d.severity == severity)
    }

    /// Sum of the current damage prices
    ///
    /// Fails when the sum does not fit in a `Decimal`.
    pub fn damage_total(&self) -> Result<Decimal, ClaimError> {
        self.damages
            .iter()
            .try_fold(Decimal::ZERO, |acc, d| acc.checked_add(d.price))
            .ok_or_else(|| {
                ClaimError::validation(format!(
                    "Total amount of {} damages exceeds the supported range",
                    self.damages.len()
                ))
            })
    }

    /// Finished claims accept no change of any kind
    pub fn ensure_mutable(&self) -> Result<(), ClaimError> {
        if self.is_finished() {
            return Err(ClaimError::ClaimFinished);
        }
        Ok(())
    }

    /// Damages may only change while the claim is pending
    pub fn ensure_damages_editable(&self) -> Result<(), ClaimError> {
        if self.status != ClaimStatus::Pending {
            return Err(ClaimError::DamagesLocked(self.status));
        }
        Ok(())
    }

    /// Appends a damage and returns its server-assigned id
    pub fn add_damage(&mut self, new_damage: NewDamage) -> Result<DamageId, ClaimError> {
        let damage = new_damage.into_damage()?;
        let id = damage.id;
        self.damages.push(damage);
        self.damages_touched = true;
        Ok(id)
    }

    pub fn update_damage(&mut self, damage_id: DamageId, patch: DamagePatch) -> Result<&Damage, ClaimError> {
        let claim_id = self.id;
        let damage = self
            .damages
            .iter_mut()
            .find(|d| d.id == damage_id)
            .ok_or_else(|| ClaimError::DamageNotFound {
                claim_id: claim_id.to_string(),
                damage_id: damage_id.to_string(),
            })?;
        damage.apply(patch)?;
        self.damages_touched = true;
        Ok(damage)
    }

    pub fn remove_damage(&mut self, damage_id: DamageId) -> Result<Damage, ClaimError> {
        let position = self
            .damages
            .iter()
            .position(|d| d.id == damage_id)
            .ok_or_else(|| ClaimError::DamageNotFound {
                claim_id: self.id.to_string(),
                damage_id: damage_id.to_string(),
            })?;
        self.damages_touched = true;
        Ok(self.damages.remove(position))
    }

    /// Applies the fields present in the patch
    pub fn apply_patch(&mut self, patch: ClaimPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(total_amount) = patch.total_amount {
            self.total_amount = total_amount;
        }
    }

    /// Pre-save hook: recomputes the total if the damages were touched
    /// and refreshes the update timestamp
    pub fn before_save(&mut self) -> Result<(), ClaimError> {
        if self.damages_touched {
            self.total_amount = self.damage_total()?;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Clears the touched mark once the claim has been persisted
    pub fn mark_saved(&mut self) {
        self.damages_touched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn damage(price: Decimal) -> NewDamage {
        NewDamage::new("Bumper", DamageSeverity::Low, "http://img.com", price)
    }

    fn stored_claim(total: Decimal, prices: &[Decimal]) -> Claim {
        let mut claim = Claim::open(NewClaim {
            title: "Accident".to_string(),
            description: "Rear-ended at a light".to_string(),
            damages: prices.iter().copied().map(damage).collect(),
        })
        .unwrap();
        claim.mark_saved();
        claim.total_amount = total;
        claim
    }

    #[test]
    fn test_hook_recomputes_when_damages_touched() {
        let mut claim = stored_claim(dec!(0), &[dec!(100), dec!(50.5), dec!(0)]);
        claim.add_damage(damage(dec!(0))).unwrap();
        claim.before_save().unwrap();
        assert_eq!(claim.total_amount, dec!(150.5));
    }

    #[test]
    fn test_hook_leaves_total_alone_when_untouched() {
        let mut claim = stored_claim(dec!(999), &[dec!(100)]);
        claim.before_save().unwrap();
        assert_eq!(claim.total_amount, dec!(999));
    }

    #[test]
    fn test_hook_handles_empty_damages() {
        let mut claim = stored_claim(dec!(100), &[dec!(100)]);
        let only = claim.damages()[0].id;
        claim.remove_damage(only).unwrap();
        claim.before_save().unwrap();
        assert_eq!(claim.total_amount, dec!(0));
    }

    #[test]
    fn test_hook_rejects_total_past_decimal_range() {
        let near_max = Decimal::MAX - dec!(1);
        let mut claim = stored_claim(dec!(0), &[near_max]);
        claim.add_damage(damage(near_max)).unwrap();

        let err = claim.before_save().unwrap_err();
        assert!(matches!(err, ClaimError::Validation(_)));
        assert_eq!(claim.total_amount, dec!(0));
    }

    #[test]
    fn test_new_claim_is_pending_with_touched_damages() {
        let claim = Claim::open(NewClaim {
            title: "Hail".to_string(),
            description: "Dents everywhere".to_string(),
            damages: vec![damage(dec!(10))],
        })
        .unwrap();

        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.total_amount, dec!(0));
        assert!(claim.damages_touched());
    }

    #[test]
    fn test_restored_claim_is_untouched() {
        let claim = Claim::restore(
            ClaimId::new(),
            "t".to_string(),
            "d".to_string(),
            ClaimStatus::InReview,
            dec!(42),
            vec![],
            Utc::now(),
            Utc::now(),
        );
        assert!(!claim.damages_touched());
        assert!(claim.ensure_damages_editable().is_err());
        assert!(claim.ensure_mutable().is_ok());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&ClaimStatus::InReview).unwrap(), "\"IN_REVIEW\"");
        assert_eq!("FINISHED".parse::<ClaimStatus>().unwrap(), ClaimStatus::Finished);
        assert!("DONE".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn test_touched_flag_is_not_serialized() {
        let claim = stored_claim(dec!(0), &[]);
        let json = serde_json::to_value(&claim).unwrap();
        assert!(json.get("damagesTouched").is_none());
        assert!(json.get("totalAmount").is_some());
    }
}
