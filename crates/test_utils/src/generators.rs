//! Property-Based Test Generators
//!
//! Proptest strategies for claims and damages that respect the input rules
//! (non-empty text, non-negative prices).

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{ClaimStatus, DamageSeverity, NewClaim, NewDamage};

pub fn severity_strategy() -> impl Strategy<Value = DamageSeverity> {
    prop_oneof![
        Just(DamageSeverity::Low),
        Just(DamageSeverity::Mid),
        Just(DamageSeverity::High),
    ]
}

pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::InReview),
        Just(ClaimStatus::Finished),
    ]
}

/// Non-negative prices with two decimal places
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

pub fn new_damage_strategy() -> impl Strategy<Value = NewDamage> {
    ("[A-Z][a-z]{2,12}", severity_strategy(), price_strategy()).prop_map(
        |(part, severity, price)| {
            NewDamage::new(part, severity, "http://img.com/damage.png", price)
        },
    )
}

/// Descriptions from empty up to well past the high severity threshold
pub fn description_strategy() -> impl Strategy<Value = String> {
    (0usize..200).prop_map(|len| "d".repeat(len))
}

pub fn new_claim_strategy() -> impl Strategy<Value = NewClaim> {
    (
        "[A-Za-z ]{1,40}",
        description_strategy(),
        prop::collection::vec(new_damage_strategy(), 0..8),
    )
        .prop_map(|(title, description, damages)| NewClaim {
            title,
            description,
            damages,
        })
}

/// Strings that can never parse as a claim or damage id
pub fn malformed_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9a-f]{0,23}",
        "[0-9a-f]{25,40}",
        "[g-z]{24}",
        ".*[^0-9a-fA-F].*",
    ]
    .prop_filter("must not be a valid object id", |s| {
        !(s.len() == 24 && s.chars().all(|c| c.is_ascii_hexdigit()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClaimId;

    proptest! {
        #[test]
        fn prop_prices_are_non_negative(price in price_strategy()) {
            prop_assert!(price >= Decimal::ZERO);
        }

        #[test]
        fn prop_malformed_ids_do_not_parse(raw in malformed_id_strategy()) {
            prop_assert!(raw.parse::<ClaimId>().is_err());
        }

        #[test]
        fn prop_generated_claims_have_titles(claim in new_claim_strategy()) {
            prop_assert!(!claim.title.is_empty());
            prop_assert!(claim.damages.len() < 8);
        }
    }
}
