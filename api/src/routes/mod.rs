//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Liveness check (public)
//! - `/auth` → Registration, login, current-user echo
//! - `/tickets` → Ticket lifecycle, comments, attachments (authenticated)
//! - `/users` → User directory management (ICTO Head only)
//! - `/analytics` → Scoped dashboard counts and admin summary (authenticated)

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::routes::{
    analytics::analytics_routes, auth::auth_routes, health::health_routes,
    tickets::tickets_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn};
use common::state::AppState;

pub mod analytics;
pub mod auth;
pub mod health;
pub mod tickets;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// Access control is layered per route group: `/users` is admin-gated as a
/// whole, `/tickets` and `/analytics` require authentication with stricter
/// guards attached to individual mutating routes inside their modules.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/tickets",
            tickets_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest(
            "/analytics",
            analytics_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
