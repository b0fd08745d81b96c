//! Core Kernel - Foundational types shared by the claims desk crates
//!
//! This crate provides the building blocks used by the domain, infrastructure
//! and API layers:
//! - Object-id style identifiers for claims and their damage items
//! - The kernel error type
//! - Port abstractions (errors, marker traits, health checks) for adapters

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{ClaimId, DamageId, OBJECT_ID_HEX_LEN};
pub use error::CoreError;
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
