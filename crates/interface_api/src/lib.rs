//! HTTP API Layer
//!
//! This crate provides the REST API for the claims desk using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims, damages and health
//! - **Middleware**: Request logging
//! - **DTOs**: Request/Response data transfer objects with validation rules
//! - **Extractors**: Validated JSON bodies
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(Arc::new(PgClaimRepository::new(pool)));
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_claims::{ClaimRepository, ClaimService, ClaimStore, DamageService, FinishRules};

use crate::handlers::{claims, damages, health};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: Arc<ClaimService>,
    pub damages: Arc<DamageService>,
    pub store: ClaimStore,
}

impl AppState {
    /// Wires both services over one repository with the standard finish rules
    pub fn new(repository: Arc<dyn ClaimRepository>) -> Self {
        Self::with_finish_rules(repository, FinishRules::standard())
    }

    pub fn with_finish_rules(repository: Arc<dyn ClaimRepository>, rules: FinishRules) -> Self {
        let store = ClaimStore::new(repository);
        Self {
            claims: Arc::new(ClaimService::new(store.clone()).with_finish_rules(rules)),
            damages: Arc::new(DamageService::new(store.clone())),
            store,
        }
    }
}

/// Creates the main API router
///
/// Claim routes live under `/claims`; `/health` and `/health/ready` report
/// liveness and storage readiness.
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", post(claims::create_claim).get(claims::list_claims))
        .route("/:id", get(claims::get_claim).patch(claims::update_claim))
        .route("/:id/damages", post(damages::add_damage))
        .route(
            "/:id/damages/:damage_id",
            patch(damages::update_damage).delete(damages::delete_damage),
        );

    Router::new()
        .merge(health_routes)
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
