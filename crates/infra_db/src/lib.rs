//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL storage for the claims desk using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. [`PgClaimRepository`] implements
//! the domain's `ClaimRepository` port, so the domain layer never sees SQL
//! or driver errors.
//!
//! # Storage Model
//!
//! One row per claim. Damages are embedded in the row as a JSONB array, so a
//! claim and its damages are always read and written together.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, PgClaimRepository, create_pool, run_migrations};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! run_migrations(&pool).await?;
//! let repository = PgClaimRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::PgClaimRepository;
