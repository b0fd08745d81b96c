//! Repository implementations for domain aggregates
//!
//! Repositories encapsulate SQL and map between database rows and domain
//! types. Queries use the runtime `sqlx::query` API so the crate builds
//! without a live database.

pub mod claims;

pub use claims::PgClaimRepository;
