//! HTTP API Layer
//!
//! This crate provides the REST API for the health portal using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per resource
//! - **Middleware**: Bearer authentication and audit logging
//! - **DTOs**: Bodies that differ from the domain types
//! - **Error Handling**: Consistent JSON error responses
//!
//! Handlers only see the port traits, so the router runs unchanged over
//! [`infra_db::PostgresStore`] or [`infra_db::InMemoryStore`].
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(Arc::new(store), Arc::new(SystemClock), config);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use core_kernel::{Clock, HealthCheckable};
use domain_catalog::ItemPort;
use domain_claims::ClaimPort;
use domain_party::{AccountService, MedicalHistoryPort, UserPort};
use domain_policy::PolicyPort;

use crate::auth::TokenService;
use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{account, claims, health, items, medical, policy};

/// A storage adapter implementing every port
pub trait Store:
    UserPort + PolicyPort + ClaimPort + MedicalHistoryPort + ItemPort + HealthCheckable
{
}

impl<T> Store for T where
    T: UserPort + PolicyPort + ClaimPort + MedicalHistoryPort + ItemPort + HealthCheckable
{
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub users: Arc<dyn UserPort>,
    pub policies: Arc<dyn PolicyPort>,
    pub claims: Arc<dyn ClaimPort>,
    pub medical_history: Arc<dyn MedicalHistoryPort>,
    pub items: Arc<dyn ItemPort>,
    pub health: Arc<dyn HealthCheckable>,
    pub tokens: TokenService,
    pub clock: Arc<dyn Clock>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new<S: Store>(store: Arc<S>, clock: Arc<dyn Clock>, config: ApiConfig) -> Self {
        let users: Arc<dyn UserPort> = store.clone();
        Self {
            accounts: AccountService::new(users.clone()),
            users,
            policies: store.clone(),
            claims: store.clone(),
            medical_history: store.clone(),
            items: store.clone(),
            health: store,
            tokens: TokenService::from_config(&config),
            clock,
            config,
        }
    }

    /// Replaces the account service, e.g. to use cheaper hashing in tests
    pub fn with_accounts(mut self, accounts: AccountService) -> Self {
        self.accounts = accounts;
        self
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/v1", get(account::api_overview))
        .route("/api/v1/", get(account::api_overview));

    let auth_routes = Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/token/refresh", post(account::refresh));

    // Items have no owner and need no token
    let item_routes = Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route(
            "/:id",
            get(items::get_item).put(items::update_item).delete(items::delete_item),
        );

    let policy_routes = Router::new()
        .route("/", get(policy::list_policies).post(policy::create_policy))
        .route(
            "/:id",
            get(policy::get_policy).put(policy::update_policy).delete(policy::delete_policy),
        );

    let medical_routes = Router::new()
        .route("/", get(medical::list_records).post(medical::create_record))
        .route(
            "/:id",
            get(medical::get_record).put(medical::update_record).delete(medical::delete_record),
        );

    let claims_routes = Router::new()
        .route("/", get(claims::list_claims).post(claims::create_claim))
        .route(
            "/:id",
            get(claims::get_claim).put(claims::update_claim).delete(claims::delete_claim),
        )
        .route("/:id/details", get(claims::get_claim))
        .route("/:id/documents", get(claims::list_documents).post(claims::add_document))
        .route("/:id/documents/:document_id", axum::routing::delete(claims::delete_document));

    // Protected API routes
    let protected_routes = Router::new()
        .route(
            "/auth/profile",
            get(account::get_profile).put(account::update_profile).patch(account::update_profile),
        )
        .nest("/policies", policy_routes)
        .nest("/medical-history", medical_routes)
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/items", item_routes)
        .merge(protected_routes);

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
