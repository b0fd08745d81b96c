//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;
use crate::claim::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid {entity} ID format: {value}")]
    MalformedId { entity: &'static str, value: String },

    #[error("Claim with ID {0} not found")]
    ClaimNotFound(String),

    #[error("Damage with ID {damage_id} not found in claim {claim_id}")]
    DamageNotFound { claim_id: String, damage_id: String },

    #[error("Cannot modify a finished claim")]
    ClaimFinished,

    #[error("Damages can only be managed when claim status is PENDING. Current status: {0}")]
    DamagesLocked(ClaimStatus),

    #[error("{reason}")]
    FinishRejected { rule: &'static str, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(#[from] PortError),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    /// Checks if the error means the claim or damage does not exist
    ///
    /// Malformed identifiers are reported the same way as unknown ones.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClaimError::MalformedId { .. }
                | ClaimError::ClaimNotFound(_)
                | ClaimError::DamageNotFound { .. }
        )
    }

    /// Checks if the error is a business-rule violation
    pub fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            ClaimError::ClaimFinished
                | ClaimError::DamagesLocked(_)
                | ClaimError::FinishRejected { .. }
        )
    }
}
