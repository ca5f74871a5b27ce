use axum::{
    Router,
    routing::{get, patch},
};
use ::common::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod patch;

use delete::delete_user;
use get::{get_user, list_users};
use patch::{update_user, update_user_status};

/// User directory management. The entire group is gated to ICTO Head by the
/// `allow_admin` layer applied where these routes are nested.
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{user_id}", get(get_user).patch(update_user).delete(delete_user))
        .route("/{user_id}/status", patch(update_user_status))
}
