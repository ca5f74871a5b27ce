use axum::{
    Router,
    routing::{get, post},
};
use common::state::AppState;

pub mod get;
pub mod patch;
pub mod post;

use get::me;
use patch::update_me;
use post::{login, register};

/// Registration and login are public; `/me` authenticates via the bearer
/// token extractor directly.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me).patch(update_me))
}
