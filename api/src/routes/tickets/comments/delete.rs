use crate::response::ApiResponse;
use crate::routes::tickets::common::{CommentResponse, TicketDetailResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::ticket::Model as TicketModel;
use db::models::ticket_comment::Model as CommentModel;

/// DELETE /api/tickets/{ticket_id}/comments/{comment_id}/attachment
///
/// Removes a comment's attachment. ICTO-family only (route guard). The
/// external store is instructed to delete the object first; the stored
/// reference is cleared only if that succeeds, so a failed external delete
/// never leaves the comment claiming the file is gone.
///
/// ### Responses
/// - `200 OK` → updated ticket with its comment thread
/// - `400 Bad Request` → comment has no attachment
/// - `403 Forbidden` → caller is not ICTO Staff or ICTO Head
/// - `404 Not Found` → ticket absent, or comment not on this ticket
/// - `502 Bad Gateway` → attachment store delete failed; reference kept
pub async fn delete_attachment(
    State(app_state): State<AppState>,
    Path((ticket_id, comment_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let db = app_state.db();

    let ticket = match TicketModel::get_by_id(db, ticket_id).await {
        Ok(Some(ticket)) => ticket,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Ticket not found.")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, ticket_id, "Failed to fetch ticket");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error deleting attachment")),
            )
                .into_response();
        }
    };

    let comment = match CommentModel::find_for_ticket(db, ticket_id, comment_id).await {
        Ok(Some(comment)) => comment,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Comment not found.")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, ticket_id, comment_id, "Failed to fetch comment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error deleting attachment")),
            )
                .into_response();
        }
    };

    let Some(attachment_url) = &comment.attachment_url else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Comment has no attachment.")),
        )
            .into_response();
    };

    // External delete first. On failure the reference stays intact.
    if let Err(e) = app_state.attachments().delete(attachment_url).await {
        tracing::error!(error = %e, ticket_id, comment_id, "Attachment store delete failed");
        return (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::<()>::error(
                "Attachment store unavailable; attachment was not deleted.",
            )),
        )
            .into_response();
    }

    if let Err(e) = CommentModel::clear_attachment(db, comment_id).await {
        tracing::error!(error = %e, ticket_id, comment_id, "Failed to clear attachment reference");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("Error deleting attachment")),
        )
            .into_response();
    }

    match CommentModel::find_all_for_ticket(db, ticket_id).await {
        Ok(comments) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TicketDetailResponse {
                    ticket: ticket.into(),
                    comments: comments.into_iter().map(CommentResponse::from).collect(),
                },
                "Attachment deleted successfully.",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, ticket_id, "Failed to fetch comment thread");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error deleting attachment")),
            )
                .into_response()
        }
    }
}
