use crate::response::ApiResponse;
use crate::routes::tickets::common::TicketResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::ticket::{Model as TicketModel, TicketStatus};
use sea_orm::DbErr;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// PATCH /api/tickets/{ticket_id}
///
/// Sets the ticket status. ICTO-family only (enforced by the route guard).
/// Any status may be set from any current status; there is no transition
/// graph. Last write wins under concurrency.
///
/// ### Responses
/// - `200 OK` → updated ticket
/// - `400 Bad Request` → missing or unknown status value
/// - `403 Forbidden` → caller is not ICTO Staff or ICTO Head
/// - `404 Not Found` → no such ticket
pub async fn update_ticket_status(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let status = match req.status.as_deref().map(str::parse::<TicketStatus>) {
        Some(Ok(status)) => status,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error("Invalid or missing status.")),
            )
                .into_response();
        }
    };

    match TicketModel::set_status(db, ticket_id, status).await {
        Ok(ticket) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TicketResponse::from(ticket),
                "Ticket status updated successfully",
            )),
        )
            .into_response(),
        Err(DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Ticket not found.")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, ticket_id, "Failed to update ticket status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error updating ticket status")),
            )
                .into_response()
        }
    }
}
