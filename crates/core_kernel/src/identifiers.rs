//! Strongly-typed identifiers for domain entities
//!
//! Identifiers are 12-byte object ids rendered as 24 hexadecimal characters.
//! Newtype wrappers keep claim and damage identifiers from being mixed up.
//! New ids take the leading 12 bytes of a UUIDv7, so they sort by creation
//! time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// Number of hexadecimal characters in a rendered identifier
pub const OBJECT_ID_HEX_LEN: usize = 24;

const OBJECT_ID_BYTES: usize = OBJECT_ID_HEX_LEN / 2;

fn generate_object_id() -> [u8; OBJECT_ID_BYTES] {
    let uuid = Uuid::now_v7();
    let mut bytes = [0u8; OBJECT_ID_BYTES];
    bytes.copy_from_slice(&uuid.as_bytes()[..OBJECT_ID_BYTES]);
    bytes
}

fn parse_object_id(entity: &'static str, s: &str) -> Result<[u8; OBJECT_ID_BYTES], CoreError> {
    if s.len() != OBJECT_ID_HEX_LEN {
        return Err(CoreError::invalid_identifier(entity, s));
    }
    let mut bytes = [0u8; OBJECT_ID_BYTES];
    hex::decode_to_slice(s, &mut bytes)
        .map_err(|_| CoreError::invalid_identifier(entity, s))?;
    Ok(bytes)
}

macro_rules! define_object_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; OBJECT_ID_BYTES]);

        impl $name {
            /// Creates a new time-ordered identifier
            pub fn new() -> Self {
                Self(generate_object_id())
            }

            /// Creates from raw bytes
            pub fn from_bytes(bytes: [u8; OBJECT_ID_BYTES]) -> Self {
                Self(bytes)
            }

            /// Returns the raw bytes
            pub fn as_bytes(&self) -> &[u8; OBJECT_ID_BYTES] {
                &self.0
            }

            /// Returns the entity name used in error messages
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_object_id($entity, s).map(Self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

define_object_id!(ClaimId, "claim");
define_object_id!(DamageId, "damage");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_renders_as_24_hex_chars() {
        let rendered = ClaimId::new().to_string();
        assert_eq!(rendered.len(), OBJECT_ID_HEX_LEN);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_id_parsing() {
        let original = DamageId::new();
        let parsed: DamageId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_uppercase_hex_is_accepted() {
        let parsed: ClaimId = "507F1F77BCF86CD799439011".parse().unwrap();
        assert_eq!(parsed.to_string(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_malformed_ids_are_rejected() {
        for raw in ["", "123", "507f1f77bcf86cd79943901", "507f1f77bcf86cd7994390112", "zzzf1f77bcf86cd799439011"] {
            assert!(raw.parse::<ClaimId>().is_err(), "{raw:?} should not parse");
        }
    }
}
