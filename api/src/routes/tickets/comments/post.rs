use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::tickets::common::CommentResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::ticket::Model as TicketModel;
use db::models::ticket_comment::Model as CommentModel;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub content: Option<String>,
    /// URL issued by the external attachment store, when the client uploaded
    /// a file alongside the comment.
    pub attachment_url: Option<String>,
}

/// POST /api/tickets/{ticket_id}/comments
///
/// Appends a comment to the ticket's thread, authored by the caller.
/// Returns the **full updated comment list**, not just the new comment —
/// clients re-render the thread from this response.
///
/// ### Responses
/// - `201 Created` → the complete ordered comment list
/// - `400 Bad Request` → empty content
/// - `404 Not Found` → no such ticket
pub async fn add_comment(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<AddCommentRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let content = match req.content.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(content) => content,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Vec<CommentResponse>>::error(
                    "Comment content is required.",
                )),
            )
                .into_response();
        }
    };

    match TicketModel::get_by_id(db, ticket_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Vec<CommentResponse>>::error(
                    "Ticket not found.",
                )),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, ticket_id, "Failed to fetch ticket");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<CommentResponse>>::error(
                    "Error adding comment",
                )),
            )
                .into_response();
        }
    }

    if let Err(e) = CommentModel::create(
        db,
        ticket_id,
        &claims.name,
        content,
        req.attachment_url.as_deref(),
    )
    .await
    {
        tracing::error!(error = %e, ticket_id, "Failed to append comment");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<CommentResponse>>::error(
                "Error adding comment",
            )),
        )
            .into_response();
    }

    match CommentModel::find_all_for_ticket(db, ticket_id).await {
        Ok(comments) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                comments
                    .into_iter()
                    .map(CommentResponse::from)
                    .collect::<Vec<_>>(),
                "Comment added successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, ticket_id, "Failed to fetch comment thread");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<CommentResponse>>::error(
                    "Error adding comment",
                )),
            )
                .into_response()
        }
    }
}
