//! Unit tests for the identifiers module
//!
//! Covers creation, ordering, hex rendering, parsing and serde behaviour of
//! the object-id style identifiers.

use core_kernel::{ClaimId, DamageId, CoreError, OBJECT_ID_HEX_LEN};
use proptest::prelude::*;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ClaimId::new();
        let id2 = ClaimId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_generates_time_ordered_ids() {
        let id1 = ClaimId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = ClaimId::new();
        assert!(id1 < id2);
        assert!(id1.to_string() < id2.to_string());
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        let id = ClaimId::from_bytes([0xAB; 12]);
        assert_eq!(id.to_string(), "abababababababababababab");
    }

    #[test]
    fn test_from_str_round_trips_bytes() {
        let id: ClaimId = "507f1f77bcf86cd799439011".parse().unwrap();
        assert_eq!(id.as_bytes()[0], 0x50);
        assert_eq!(id.as_bytes()[11], 0x11);
    }

    #[test]
    fn test_parse_error_names_entity() {
        let err = "nope".parse::<ClaimId>().unwrap_err();
        let CoreError::InvalidIdentifier { entity, value } = err;
        assert_eq!(entity, "claim");
        assert_eq!(value, "nope");
    }

    #[test]
    fn test_entity_names() {
        assert_eq!(ClaimId::entity(), "claim");
        assert_eq!(DamageId::entity(), "damage");
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_hex_string() {
        let id: DamageId = "64b7f0c2a1d3e4f5a6b7c8d9".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"64b7f0c2a1d3e4f5a6b7c8d9\"");
    }

    #[test]
    fn test_deserialize_rejects_malformed_string() {
        let result: Result<ClaimId, _> = serde_json::from_str("\"not-an-object-id\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_string() {
        let result: Result<ClaimId, _> = serde_json::from_str("42");
        assert!(result.is_err());
    }
}

proptest! {
    #[test]
    fn prop_any_24_hex_chars_parse(raw in "[0-9a-fA-F]{24}") {
        let id: ClaimId = raw.parse().unwrap();
        prop_assert_eq!(id.to_string(), raw.to_ascii_lowercase());
    }

    #[test]
    fn prop_wrong_length_never_parses(raw in "[0-9a-f]{0,40}") {
        prop_assume!(raw.len() != OBJECT_ID_HEX_LEN);
        prop_assert!(raw.parse::<ClaimId>().is_err());
    }

    #[test]
    fn prop_non_hex_never_parses(prefix in "[0-9a-f]{23}", bad in "[g-zG-Z_\\-]") {
        let raw = format!("{prefix}{bad}");
        prop_assert!(raw.parse::<DamageId>().is_err());
    }
}
