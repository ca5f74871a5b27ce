use crate::auth::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::user::Model as UserModel;
use sea_orm::DbErr;

/// DELETE /api/users/{user_id}
///
/// Removes a user. ICTO Head only. Administrators cannot delete their own
/// account.
///
/// ### Responses
/// - `200 OK` → confirmation message
/// - `400 Bad Request` → attempted self-deletion
/// - `404 Not Found` → no such user
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    if claims.sub == user_id {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                "Cannot delete your own administrator account.",
            )),
        )
            .into_response();
    }

    match UserModel::delete(db, user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "User deleted successfully.")),
        )
            .into_response(),
        Err(DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("User not found.")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id, "Failed to delete user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error deleting user")),
            )
                .into_response()
        }
    }
}
