//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use core_kernel::{ClaimId, DamageId};
use domain_claims::{Claim, ClaimStatus, Damage, DamageSeverity, NewClaim, NewDamage};

use crate::fixtures::StringFixtures;

/// Builder for the input of `ClaimService::create`
pub struct NewClaimBuilder {
    title: String,
    description: String,
    damages: Vec<NewDamage>,
}

impl Default for NewClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewClaimBuilder {
    pub fn new() -> Self {
        Self {
            title: StringFixtures::title().to_string(),
            description: "Rear-ended at a traffic light".to_string(),
            damages: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a damage with the default part and image
    pub fn with_damage(mut self, severity: DamageSeverity, price: Decimal) -> Self {
        self.damages
            .push(NewDamage::new("Bumper", severity, StringFixtures::image_url(), price));
        self
    }

    pub fn build(self) -> NewClaim {
        NewClaim {
            title: self.title,
            description: self.description,
            damages: self.damages,
        }
    }
}

/// Builder for a claim as it would come back from storage
///
/// The stored total is whatever the test sets, so drift between the total
/// and the damages can be staged on purpose.
pub struct StoredClaimBuilder {
    id: ClaimId,
    title: String,
    description: String,
    status: ClaimStatus,
    total_amount: Option<Decimal>,
    damages: Vec<Damage>,
    created_at: DateTime<Utc>,
}

impl Default for StoredClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoredClaimBuilder {
    pub fn new() -> Self {
        Self {
            id: ClaimId::new(),
            title: StringFixtures::title().to_string(),
            description: "Stored claim".to_string(),
            status: ClaimStatus::Pending,
            total_amount: None,
            damages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: ClaimId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    /// Overrides the stored total; by default it is the sum of the damages
    pub fn with_total_amount(mut self, total: Decimal) -> Self {
        self.total_amount = Some(total);
        self
    }

    pub fn with_damage(mut self, severity: DamageSeverity, price: Decimal) -> Self {
        self.damages.push(Damage {
            id: DamageId::new(),
            part: "Bumper".to_string(),
            severity,
            image_url: StringFixtures::image_url().to_string(),
            price,
        });
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> Claim {
        let total = self
            .total_amount
            .unwrap_or_else(|| self.damages.iter().map(|d| d.price).sum());
        Claim::restore(
            self.id,
            self.title,
            self.description,
            self.status,
            total,
            self.damages,
            self.created_at,
            self.created_at,
        )
    }
}
