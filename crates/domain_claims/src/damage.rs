//! Damage line items embedded in a claim

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::DamageId;
use crate::error::ClaimError;

/// Qualitative cost tier of a damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DamageSeverity {
    Low,
    Mid,
    High,
}

impl DamageSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageSeverity::Low => "LOW",
            DamageSeverity::Mid => "MID",
            DamageSeverity::High => "HIGH",
        }
    }
}

impl fmt::Display for DamageSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cost-bearing item of a claim
///
/// Damages have no lifecycle outside their parent claim. The identifier is
/// only unique within that claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Damage {
    pub id: DamageId,
    pub part: String,
    pub severity: DamageSeverity,
    pub image_url: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Data for a damage that has not been assigned an identifier yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewDamage {
    pub part: String,
    pub severity: DamageSeverity,
    pub image_url: String,
    pub price: Decimal,
}

impl NewDamage {
    pub fn new(
        part: impl Into<String>,
        severity: DamageSeverity,
        image_url: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            part: part.into(),
            severity,
            image_url: image_url.into(),
            price,
        }
    }

    /// Assigns a fresh identifier, rejecting negative prices
    pub(crate) fn into_damage(self) -> Result<Damage, ClaimError> {
        ensure_non_negative(self.price)?;
        Ok(Damage {
            id: DamageId::new(),
            part: self.part,
            severity: self.severity,
            image_url: self.image_url,
            price: self.price,
        })
    }
}

/// Partial update of a damage; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamagePatch {
    pub part: Option<String>,
    pub severity: Option<DamageSeverity>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
}

impl DamagePatch {
    pub fn is_empty(&self) -> bool {
        self.part.is_none()
            && self.severity.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
    }
}

impl Damage {
    /// Applies the provided fields; nothing changes if validation fails
    pub(crate) fn apply(&mut self, patch: DamagePatch) -> Result<(), ClaimError> {
        if let Some(price) = patch.price {
            ensure_non_negative(price)?;
            self.price = price;
        }
        if let Some(part) = patch.part {
            self.part = part;
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        Ok(())
    }
}

fn ensure_non_negative(price: Decimal) -> Result<(), ClaimError> {
    if price < Decimal::ZERO {
        return Err(ClaimError::validation(format!(
            "Damage price must be non-negative, got {}",
            price
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bumper() -> Damage {
        NewDamage::new("Bumper", DamageSeverity::Low, "http://img.com/bumper.png", dec!(100))
            .into_damage()
            .unwrap()
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let result = NewDamage::new("Door", DamageSeverity::Mid, "http://img.com", dec!(-0.01)).into_damage();
        assert!(matches!(result, Err(ClaimError::Validation(_))));
    }

    #[test]
    fn test_zero_price_is_accepted() {
        let damage = NewDamage::new("Mirror", DamageSeverity::Low, "http://img.com", dec!(0))
            .into_damage()
            .unwrap();
        assert_eq!(damage.price, dec!(0));
    }

    #[test]
    fn test_patch_only_touches_provided_fields() {
        let mut damage = bumper();
        damage
            .apply(DamagePatch {
                severity: Some(DamageSeverity::High),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(damage.severity, DamageSeverity::High);
        assert_eq!(damage.part, "Bumper");
        assert_eq!(damage.price, dec!(100));
    }

    #[test]
    fn test_rejected_patch_leaves_damage_unchanged() {
        let mut damage = bumper();
        let before = damage.clone();
        let result = damage.apply(DamagePatch {
            part: Some("Hood".to_string()),
            price: Some(dec!(-5)),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(damage, before);
    }

    #[test]
    fn test_serialized_shape() {
        let damage = bumper();
        let json = serde_json::to_value(&damage).unwrap();

        assert_eq!(json["severity"], "LOW");
        assert_eq!(json["imageUrl"], "http://img.com/bumper.png");
        assert_eq!(json["price"], 100.0);
        assert_eq!(json["id"].as_str().unwrap().len(), 24);
    }
}
