//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::{ClaimId, PortError};

#[test]
fn test_core_error_invalid_identifier_display() {
    let error = CoreError::invalid_identifier("damage", "abc");
    let display = format!("{}", error);

    assert!(display.contains("damage"));
    assert!(display.contains("abc"));
}

#[test]
fn test_parse_failure_names_the_entity() {
    let error = "xyz".parse::<ClaimId>().unwrap_err();
    assert_eq!(error.to_string(), "Invalid claim identifier: xyz");
}

#[test]
fn test_port_error_constructors() {
    assert!(matches!(
        PortError::transformation("bad status"),
        PortError::Transformation { .. }
    ));

    let internal = PortError::internal("boom");
    assert!(!internal.is_not_found());
    assert_eq!(internal.to_string(), "Internal error: boom");
}
