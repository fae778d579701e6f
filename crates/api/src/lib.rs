//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Error responses and extractors that produce them

pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sea_orm::DatabaseConnection;
use tally_core::group::{Caller, GroupService};
use tally_db::GroupRepository;
use tally_shared::JwtService;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::AuthUser;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Cancelled when the server begins shutting down.
    pub shutdown: CancellationToken,
    /// Deadline for each group operation.
    pub request_timeout: Duration,
}

impl AppState {
    /// Builds the group service over the shared pool.
    #[must_use]
    pub fn group_service(&self) -> GroupService<GroupRepository> {
        GroupService::new(Arc::new(GroupRepository::new((*self.db).clone())))
    }

    /// Builds the caller context for an authenticated request.
    ///
    /// The caller is cancelled on shutdown and gives up after the
    /// configured request timeout.
    #[must_use]
    pub fn caller(&self, auth: &AuthUser) -> Caller {
        Caller::new(auth.user_id())
            .with_cancellation(self.shutdown.child_token())
            .with_timeout(self.request_timeout)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
