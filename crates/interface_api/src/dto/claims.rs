//! Claims DTOs
//!
//! Wire format is camelCase. Amounts travel as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use domain_claims::{
    Claim, ClaimPatch, ClaimStatus, Damage, DamagePatch, DamageSeverity, NewClaim, NewDamage,
};

fn non_negative(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("price must not be negative".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDamageRequest {
    #[validate(length(min = 1, message = "part is required"))]
    pub part: String,
    pub severity: DamageSeverity,
    #[validate(length(min = 1, message = "imageUrl is required"))]
    pub image_url: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
}

impl From<CreateDamageRequest> for NewDamage {
    fn from(request: CreateDamageRequest) -> Self {
        NewDamage::new(request.part, request.severity, request.image_url, request.price)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    #[validate(nested)]
    pub damages: Vec<CreateDamageRequest>,
}

impl From<CreateClaimRequest> for NewClaim {
    fn from(request: CreateClaimRequest) -> Self {
        NewClaim {
            title: request.title,
            description: request.description,
            damages: request.damages.into_iter().map(NewDamage::from).collect(),
        }
    }
}

/// Partial claim update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClaimRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub status: Option<ClaimStatus>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
}

impl From<UpdateClaimRequest> for ClaimPatch {
    fn from(request: UpdateClaimRequest) -> Self {
        ClaimPatch {
            title: request.title,
            description: request.description,
            status: request.status,
            total_amount: request.total_amount,
        }
    }
}

/// Partial damage update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDamageRequest {
    #[validate(length(min = 1, message = "part must not be empty"))]
    pub part: Option<String>,
    pub severity: Option<DamageSeverity>,
    #[validate(length(min = 1, message = "imageUrl must not be empty"))]
    pub image_url: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom(function = "non_negative"))]
    pub price: Option<Decimal>,
}

impl From<UpdateDamageRequest> for DamagePatch {
    fn from(request: UpdateDamageRequest) -> Self {
        DamagePatch {
            part: request.part,
            severity: request.severity,
            price: request.price,
            image_url: request.image_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageResponse {
    pub id: String,
    pub part: String,
    pub severity: DamageSeverity,
    pub image_url: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&Damage> for DamageResponse {
    fn from(damage: &Damage) -> Self {
        Self {
            id: damage.id.to_string(),
            part: damage.part.clone(),
            severity: damage.severity,
            image_url: damage.image_url.clone(),
            price: damage.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: ClaimStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub damages: Vec<DamageResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id.to_string(),
            damages: claim.damages().iter().map(DamageResponse::from).collect(),
            title: claim.title,
            description: claim.description,
            status: claim.status,
            total_amount: claim.total_amount,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_create_request_reads_camel_case_numbers() {
        let request: CreateClaimRequest = serde_json::from_value(json!({
            "title": "Accident",
            "description": "Rear-ended",
            "damages": [
                { "part": "Bumper", "severity": "HIGH", "imageUrl": "http://img.com", "price": 250.50 }
            ]
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.damages[0].price, dec!(250.50));
        assert_eq!(request.damages[0].severity, DamageSeverity::High);
    }

    #[test]
    fn test_create_request_damages_default_to_empty() {
        let request: CreateClaimRequest =
            serde_json::from_value(json!({ "title": "t", "description": "d" })).unwrap();
        assert!(request.damages.is_empty());
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let request: CreateClaimRequest =
            serde_json::from_value(json!({ "title": "", "description": "d" })).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_negative_nested_price_fails_validation() {
        let request: CreateClaimRequest = serde_json::from_value(json!({
            "title": "t",
            "description": "d",
            "damages": [{ "part": "Door", "severity": "LOW", "imageUrl": "u", "price": -1 }]
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_omitted_fields_are_none() {
        let request: UpdateClaimRequest =
            serde_json::from_value(json!({ "status": "IN_REVIEW" })).unwrap();
        let patch = ClaimPatch::from(request);
        assert_eq!(patch.status, Some(ClaimStatus::InReview));
        assert!(patch.title.is_none());
        assert!(patch.total_amount.is_none());
    }

    #[test]
    fn test_update_damage_price_is_optional() {
        let request: UpdateDamageRequest =
            serde_json::from_value(json!({ "part": "Hood" })).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.price.is_none());

        let negative: UpdateDamageRequest =
            serde_json::from_value(json!({ "price": -5 })).unwrap();
        assert!(negative.validate().is_err());
    }
}
