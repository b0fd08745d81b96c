//! Rules gating the transition of a claim into `Finished`
//!
//! Each rule implements [`FinishValidationStrategy`]. [`FinishRules`] holds
//! them in registration order and stops at the first failure.

use tracing::debug;

use crate::claim::Claim;
use crate::damage::DamageSeverity;
use crate::error::ClaimError;

/// A rule a claim must satisfy before it may be finished
pub trait FinishValidationStrategy: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Fails if the claim is not eligible to be finished
    fn validate(&self, claim: &Claim) -> Result<(), ClaimError>;
}

/// Claims with a high severity damage need a substantial description
#[derive(Debug, Clone, Copy, Default)]
pub struct HighSeverityDescriptionStrategy;

impl HighSeverityDescriptionStrategy {
    /// The description must be strictly longer than this many characters
    pub const MIN_DESCRIPTION_CHARS: usize = 100;
}

impl FinishValidationStrategy for HighSeverityDescriptionStrategy {
    fn name(&self) -> &'static str {
        "high_severity_description"
    }

    fn validate(&self, claim: &Claim) -> Result<(), ClaimError> {
        if !claim.has_damage_with_severity(DamageSeverity::High) {
            return Ok(());
        }

        if claim.description.chars().count() <= Self::MIN_DESCRIPTION_CHARS {
            return Err(ClaimError::FinishRejected {
                rule: self.name(),
                reason: format!(
                    "Claims with HIGH severity damages require a description exceeding {} characters to be Finished.",
                    Self::MIN_DESCRIPTION_CHARS
                ),
            });
        }

        Ok(())
    }
}

/// Ordered collection of finish rules
pub struct FinishRules {
    strategies: Vec<Box<dyn FinishValidationStrategy>>,
}

impl FinishRules {
    /// No rules; every claim may be finished
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// The rules the claims desk ships with
    pub fn standard() -> Self {
        Self::empty().register(HighSeverityDescriptionStrategy)
    }

    /// Appends a rule; rules run in the order they were registered
    pub fn register(mut self, strategy: impl FinishValidationStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Runs every rule against the claim, stopping at the first failure
    pub fn evaluate(&self, claim: &Claim) -> Result<(), ClaimError> {
        for strategy in &self.strategies {
            debug!(claim_id = %claim.id, rule = strategy.name(), "Evaluating finish rule");
            strategy.validate(claim)?;
        }
        Ok(())
    }
}

impl Default for FinishRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for FinishRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
