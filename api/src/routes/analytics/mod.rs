use crate::auth::guards::allow_admin;
use axum::{Router, middleware::from_fn, routing::get};
use common::state::AppState;

pub mod get;

use get::{dashboard_summary, main_summary};

/// Ticket count analytics. The personal dashboard summary is available to
/// every authenticated caller (scoped to what they can see); the system-wide
/// summary is ICTO Head only.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard-summary", get(dashboard_summary))
        .route("/summary", get(main_summary).route_layer(from_fn(allow_admin)))
}
