use crate::auth::guards::allow_icto;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, patch, post},
};
use ::common::state::AppState;

pub mod comments;
pub mod common;
pub mod get;
pub mod patch;
pub mod post;

use comments::delete::delete_attachment;
use comments::post::add_comment;
use get::{get_ticket, list_tickets};
use patch::update_ticket_status;
use post::create_ticket;

/// Ticket routes. The whole group requires authentication (layered by the
/// caller); status edits and attachment deletion additionally require an
/// ICTO-family role.
pub fn tickets_routes() -> Router<AppState> {
    let icto_only = Router::new()
        .route("/{ticket_id}", patch(update_ticket_status))
        .route(
            "/{ticket_id}/comments/{comment_id}/attachment",
            delete(delete_attachment),
        )
        .route_layer(from_fn(allow_icto));

    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route("/{ticket_id}", get(get_ticket))
        .route("/{ticket_id}/comments", post(add_comment))
        .merge(icto_only)
}
