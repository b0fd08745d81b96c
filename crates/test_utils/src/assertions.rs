//! Custom Test Assertions
//!
//! Assertion helpers for claim results that print the offending state on
//! failure.

use rust_decimal::Decimal;

use domain_claims::{Claim, ClaimError, ClaimStatus};

/// Asserts that the total amount equals the sum of the damage prices
///
/// # Panics
///
/// Panics with the total, the sum and the damage count on mismatch
pub fn assert_total_matches_damages(claim: &Claim) {
    let sum: Decimal = claim.damages().iter().map(|d| d.price).sum();
    assert_eq!(
        claim.total_amount,
        sum,
        "Claim {} total {} does not match damage sum {} over {} damages",
        claim.id,
        claim.total_amount,
        sum,
        claim.damages().len()
    );
}

pub fn assert_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Claim {} has status {}, expected {}",
        claim.id, claim.status, expected
    );
}

/// Asserts that an operation failed as a business-rule violation
pub fn assert_invalid_operation<T: std::fmt::Debug>(result: &Result<T, ClaimError>) {
    match result {
        Err(err) if err.is_invalid_operation() => {}
        other => panic!("Expected an invalid operation error, got {:?}", other),
    }
}

/// Asserts that an operation failed because the claim or damage is absent
pub fn assert_not_found<T: std::fmt::Debug>(result: &Result<T, ClaimError>) {
    match result {
        Err(err) if err.is_not_found() => {}
        other => panic!("Expected a not found error, got {:?}", other),
    }
}
