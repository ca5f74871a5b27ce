use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::users::common::UserResponse;
use crate::routes::users::patch::taken;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use common::{format_validation_errors, state::AppState};
use db::models::user::{Column as UserColumn, Entity as UserEntity};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    #[validate(email(message = "a valid email is required"))]
    pub email: Option<String>,
    pub office: Option<String>,
}

/// PATCH /api/auth/me
///
/// Self-service profile update: the caller may change their own name, email
/// and office. Role and employee id stay admin-managed and are not accepted
/// here. Email uniqueness is re-checked when the address changes.
///
/// ### Responses
/// - `200 OK` → updated user
/// - `400 Bad Request` → no fields supplied, or invalid email
/// - `401 Unauthorized` → missing or invalid JWT
/// - `409 Conflict` → email already registered to another account
pub async fn update_me(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateMeRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if req.name.is_none() && req.email.is_none() && req.office.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("No update data provided.")),
        )
            .into_response();
    }

    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let user = match UserEntity::find_by_id(claims.sub).one(db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found.")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = claims.sub, "Failed to fetch user");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error updating profile")),
            )
                .into_response();
        }
    };

    if let Some(email) = req.email.as_deref().filter(|e| *e != user.email.as_str()) {
        match taken(db, UserColumn::Email, email, claims.sub).await {
            Ok(true) => {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<()>::error("Email address already registered.")),
                )
                    .into_response();
            }
            Ok(false) => {}
            Err(resp) => return resp,
        }
    }

    let mut active: db::models::user::ActiveModel = user.into();
    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    if let Some(office) = req.office {
        active.office = Set(Some(office));
    }
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "Profile updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id = claims.sub, "Failed to update profile");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error updating profile")),
            )
                .into_response()
        }
    }
}
