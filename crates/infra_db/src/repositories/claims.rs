//! PostgreSQL claim repository
//!
//! Implements the domain's `ClaimRepository` port over the `claims` table.
//! Each claim is one row; its damages live in the `damages` JSONB column in
//! insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ClaimId, DamageId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_claims::{Claim, ClaimRepository, ClaimStatus, Damage, DamageSeverity};

use crate::error::DatabaseError;

const SELECT_CLAIM: &str = r#"
    SELECT id, title, description, status, total_amount, damages, created_at, updated_at
    FROM claims
"#;

/// PostgreSQL-backed implementation of the ClaimRepository port
///
/// # Health Checking
///
/// `health_check` runs `SELECT 1` to verify the pool can reach the database.
#[derive(Debug, Clone)]
pub struct PgClaimRepository {
    pool: PgPool,
}

impl PgClaimRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgClaimRepository {}

#[async_trait]
impl HealthCheckable for PgClaimRepository {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-claims".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-claims".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl ClaimRepository for PgClaimRepository {
    #[instrument(skip(self), fields(claim_id = %id))]
    async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        debug!("Fetching claim by ID");

        let row = sqlx::query_as::<_, ClaimRow>(&format!("{SELECT_CLAIM} WHERE id = $1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        row.map(Claim::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Claim>, PortError> {
        let rows = sqlx::query_as::<_, ClaimRow>(&format!("{SELECT_CLAIM} ORDER BY created_at, id"))
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        debug!(count = rows.len(), "Fetched claims");
        rows.into_iter().map(Claim::try_from).collect()
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id))]
    async fn save(&self, claim: &Claim) -> Result<(), PortError> {
        let damages: Vec<DamageDocument> = claim.damages().iter().map(DamageDocument::from).collect();

        sqlx::query(
            r#"
            INSERT INTO claims (
                id, title, description, status, total_amount, damages, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                status = EXCLUDED.status,
                total_amount = EXCLUDED.total_amount,
                damages = EXCLUDED.damages,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(claim.id.to_string())
        .bind(&claim.title)
        .bind(&claim.description)
        .bind(claim.status.as_str())
        .bind(claim.total_amount)
        .bind(Json(damages))
        .bind(claim.created_at)
        .bind(claim.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        debug!("Claim row upserted");
        Ok(())
    }
}

/// Database row for a claim
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub total_amount: Decimal,
    pub damages: Json<Vec<DamageDocument>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored form of a damage inside the `damages` column
///
/// Prices are kept as decimal strings so they survive the JSON round trip
/// exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageDocument {
    pub id: DamageId,
    pub part: String,
    pub severity: DamageSeverity,
    pub image_url: String,
    pub price: Decimal,
}

impl From<&Damage> for DamageDocument {
    fn from(damage: &Damage) -> Self {
        Self {
            id: damage.id,
            part: damage.part.clone(),
            severity: damage.severity,
            image_url: damage.image_url.clone(),
            price: damage.price,
        }
    }
}

impl From<DamageDocument> for Damage {
    fn from(doc: DamageDocument) -> Self {
        Damage {
            id: doc.id,
            part: doc.part,
            severity: doc.severity,
            image_url: doc.image_url,
            price: doc.price,
        }
    }
}

impl TryFrom<ClaimRow> for Claim {
    type Error = PortError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let id: ClaimId = row
            .id
            .parse()
            .map_err(|e| PortError::transformation(format!("Stored claim id {}: {}", row.id, e)))?;
        let status: ClaimStatus = row
            .status
            .parse()
            .map_err(|e| PortError::transformation(format!("Claim {}: {}", id, e)))?;

        Ok(Claim::restore(
            id,
            row.title,
            row.description,
            status,
            row.total_amount,
            row.damages.0.into_iter().map(Damage::from).collect(),
            row.created_at,
            row.updated_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(id: &str, status: &str) -> ClaimRow {
        ClaimRow {
            id: id.to_string(),
            title: "Accident".to_string(),
            description: "Rear-ended".to_string(),
            status: status.to_string(),
            total_amount: dec!(350.50),
            damages: Json(vec![DamageDocument {
                id: DamageId::new(),
                part: "Bumper".to_string(),
                severity: DamageSeverity::High,
                image_url: "http://img.com".to_string(),
                price: dec!(350.50),
            }]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_restores_untouched_claim() {
        let id = ClaimId::new();
        let claim = Claim::try_from(row(&id.to_string(), "IN_REVIEW")).unwrap();

        assert_eq!(claim.id, id);
        assert_eq!(claim.status, ClaimStatus::InReview);
        assert_eq!(claim.total_amount, dec!(350.50));
        assert_eq!(claim.damages().len(), 1);
        assert!(!claim.damages_touched());
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let result = Claim::try_from(row(&ClaimId::new().to_string(), "ARCHIVED"));
        assert!(matches!(result, Err(PortError::Transformation { .. })));
    }

    #[test]
    fn test_row_with_bad_id_is_rejected() {
        let result = Claim::try_from(row("short", "PENDING"));
        assert!(matches!(result, Err(PortError::Transformation { .. })));
    }

    #[test]
    fn test_damage_document_keeps_exact_price() {
        let doc = DamageDocument {
            id: DamageId::new(),
            part: "Door".to_string(),
            severity: DamageSeverity::Mid,
            image_url: "http://img.com/door.png".to_string(),
            price: dec!(0.10),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["price"], "0.10");
        assert_eq!(json["severity"], "MID");
        assert!(json.get("imageUrl").is_some());

        let back: DamageDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}
