use crate::auth::AuthUser;
use crate::response::ApiResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub office: Option<String>,
    pub email: String,
}

/// GET /api/auth/me
///
/// Echo of the authenticated caller's identity as resolved from the bearer
/// token.
pub async fn me(AuthUser(claims): AuthUser) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            MeResponse {
                id: claims.sub,
                name: claims.name,
                role: claims.role,
                office: claims.office,
                email: claims.email,
            },
            "Current user retrieved successfully",
        )),
    )
}
