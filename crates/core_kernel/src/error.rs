//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid {entity} identifier: {value}")]
    InvalidIdentifier {
        entity: &'static str,
        value: String,
    },
}

impl CoreError {
    pub fn invalid_identifier(entity: &'static str, value: impl Into<String>) -> Self {
        CoreError::InvalidIdentifier {
            entity,
            value: value.into(),
        }
    }
}
