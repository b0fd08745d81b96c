//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for claims and their damages. Values are fixed so
//! assertions stay predictable.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_claims::{DamageSeverity, NewClaim, NewDamage};

/// Fixture for damage test data
pub struct DamageFixtures;

impl DamageFixtures {
    /// Low severity bumper scratch, priced at 100
    pub fn bumper_low() -> NewDamage {
        NewDamage::new("Bumper", DamageSeverity::Low, StringFixtures::image_url(), dec!(100))
    }

    /// High severity door damage, priced at 250.50
    pub fn door_high() -> NewDamage {
        NewDamage::new("Door", DamageSeverity::High, StringFixtures::image_url(), dec!(250.50))
    }

    /// Mid severity hood dent
    pub fn hood_mid(price: Decimal) -> NewDamage {
        NewDamage::new("Hood", DamageSeverity::Mid, StringFixtures::image_url(), price)
    }
}

/// Fixture for claim test data
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Two damages totalling 350.50
    pub fn with_two_damages() -> NewClaim {
        NewClaim {
            title: StringFixtures::title().to_string(),
            description: "Automatic calculation test".to_string(),
            damages: vec![DamageFixtures::bumper_low(), DamageFixtures::door_high()],
        }
    }

    /// High severity damage with a description too short to finish
    pub fn high_severity_short_description() -> NewClaim {
        NewClaim {
            title: StringFixtures::title().to_string(),
            description: StringFixtures::short_description().to_string(),
            damages: vec![DamageFixtures::door_high()],
        }
    }

    /// High severity damage with a description long enough to finish
    pub fn high_severity_long_description() -> NewClaim {
        NewClaim {
            title: StringFixtures::title().to_string(),
            description: StringFixtures::long_description(),
            damages: vec![DamageFixtures::door_high()],
        }
    }

    /// Only low severity damages and a five character description
    pub fn low_severity_only() -> NewClaim {
        NewClaim {
            title: StringFixtures::title().to_string(),
            description: "Short".to_string(),
            damages: vec![DamageFixtures::bumper_low()],
        }
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Well-formed id that is never generated by the tests
    pub fn unknown_claim_id() -> &'static str {
        "507f1f77bcf86cd799439011"
    }

    /// Ids that must be rejected without touching storage
    pub fn malformed_ids() -> Vec<&'static str> {
        vec![
            "",
            "123",
            "not-a-valid-id",
            "507f1f77bcf86cd79943901",
            "507f1f77bcf86cd7994390111",
            "507f1f77bcf86cd79943901g",
        ]
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    pub fn title() -> &'static str {
        "Accident Integration Test"
    }

    pub fn image_url() -> &'static str {
        "http://img.com"
    }

    pub fn short_description() -> &'static str {
        "Short desc."
    }

    /// 101 characters, one past the high severity threshold
    pub fn long_description() -> String {
        "a".repeat(101)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClaimId;

    #[test]
    fn test_two_damage_fixture_prices() {
        let claim = ClaimFixtures::with_two_damages();
        let total: Decimal = claim.damages.iter().map(|d| d.price).sum();
        assert_eq!(total, dec!(350.50));
    }

    #[test]
    fn test_id_fixtures() {
        assert!(IdFixtures::unknown_claim_id().parse::<ClaimId>().is_ok());
        for raw in IdFixtures::malformed_ids() {
            assert!(raw.parse::<ClaimId>().is_err(), "{raw} should be malformed");
        }
    }

    #[test]
    fn test_long_description_crosses_threshold() {
        assert_eq!(StringFixtures::long_description().chars().count(), 101);
    }
}
