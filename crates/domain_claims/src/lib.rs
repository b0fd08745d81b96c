//! Claims Management Domain
//!
//! This crate implements the lifecycle of a claim and its embedded damage
//! items: creation, partial updates, damage management and the guarded
//! transition into the terminal status.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending <-> InReview
//!    |           |
//!    +---> Finished <---+   (guarded by the finish rules, terminal)
//! ```
//!
//! Damages can only be changed while a claim is `Pending`. Every save that
//! follows a damage change recomputes the claim's total amount.

pub mod claim;
pub mod damage;
pub mod finish_rules;
pub mod ports;
pub mod store;
pub mod services;
pub mod error;

pub use claim::{Claim, ClaimPatch, ClaimStatus, NewClaim};
pub use damage::{Damage, DamagePatch, DamageSeverity, NewDamage};
pub use finish_rules::{FinishRules, FinishValidationStrategy, HighSeverityDescriptionStrategy};
pub use ports::ClaimRepository;
pub use store::ClaimStore;
pub use services::{ClaimService, DamageService};
pub use error::ClaimError;
