use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::tickets::common::TicketResponse;
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::{format_validation_errors, state::AppState};
use db::models::ticket::{Model as TicketModel, RequesterSnapshot};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub urgency: Option<String>,
}

/// POST /api/tickets
///
/// Creates a ticket on behalf of the authenticated caller. The requester
/// snapshot (name, role, office) is stamped from the caller's claims; any
/// requester fields in the body are ignored, so callers cannot spoof another
/// requester. Status starts at `New`.
///
/// ### Responses
/// - `201 Created` → the persisted ticket
/// - `400 Bad Request` → missing subject or description
/// - `401 Unauthorized` → missing or invalid JWT
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateTicketRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let requester = RequesterSnapshot {
        name: claims.name.clone(),
        role: claims.role.clone(),
        office: claims.office.clone(),
    };

    match TicketModel::create(
        db,
        requester,
        &req.subject,
        &req.description,
        req.category.as_deref(),
        req.sub_category.as_deref(),
        req.urgency.as_deref(),
    )
    .await
    {
        Ok(ticket) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                TicketResponse::from(ticket),
                "Ticket created successfully!",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create ticket");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error creating ticket")),
            )
                .into_response()
        }
    }
}
