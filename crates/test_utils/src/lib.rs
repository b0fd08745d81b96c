//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims desk test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for claims and damages
//! - `builders`: Builder patterns for test data construction
//! - `database`: PostgreSQL container management for repository tests
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
