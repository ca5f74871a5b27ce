use crate::response::ApiResponse;
use crate::routes::users::common::UserResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::state::AppState;
use db::models::user::{
    Column as UserColumn, Entity as UserEntity, Model as UserModel, Role, UserStatus,
};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub office: Option<String>,
    pub email: Option<String>,
    pub employee_id: Option<String>,
}

/// PATCH /api/users/{user_id}
///
/// Partial update of a user's profile fields. ICTO Head only. Email and
/// employee-id uniqueness is re-checked when those fields change.
///
/// ### Responses
/// - `200 OK` → updated user
/// - `400 Bad Request` → no fields supplied, or unknown role value
/// - `404 Not Found` → no such user
/// - `409 Conflict` → email or employee id already in use
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if req.name.is_none()
        && req.role.is_none()
        && req.office.is_none()
        && req.email.is_none()
        && req.employee_id.is_none()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("No update data provided.")),
        )
            .into_response();
    }

    let user = match UserEntity::find_by_id(user_id).one(db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found.")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, user_id, "Failed to fetch user");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error updating user")),
            )
                .into_response();
        }
    };

    let role = match req.role.as_deref().map(str::parse::<Role>) {
        None => None,
        Some(Ok(role)) => Some(role),
        Some(Err(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error("Invalid role value")),
            )
                .into_response();
        }
    };

    if let Some(email) = req.email.as_deref().filter(|e| *e != user.email.as_str()) {
        match taken(db, UserColumn::Email, email, user_id).await {
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

    if let Some(employee_id) = req.employee_id.as_deref() {
        if user.employee_id.as_deref() != Some(employee_id) {
            match taken(db, UserColumn::EmployeeId, employee_id, user_id).await {
                Ok(true) => {
                    return (
                        StatusCode::CONFLICT,
                        Json(ApiResponse::<()>::error("Employee ID already registered.")),
                    )
                        .into_response();
                }
                Ok(false) => {}
                Err(resp) => return resp,
            }
        }
    }

    let mut active: db::models::user::ActiveModel = user.into();
    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(role) = role {
        active.role = Set(role);
    }
    if let Some(office) = req.office {
        active.office = Set(Some(office));
    }
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    if let Some(employee_id) = req.employee_id {
        active.employee_id = Set(Some(employee_id));
    }
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id, "Failed to update user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error updating user")),
            )
                .into_response()
        }
    }
}

/// True when `value` is already used for `column` by some other user.
pub(crate) async fn taken(
    db: &sea_orm::DatabaseConnection,
    column: UserColumn,
    value: &str,
    user_id: i64,
) -> Result<bool, axum::response::Response> {
    UserEntity::find()
        .filter(column.eq(value))
        .filter(UserColumn::Id.ne(user_id))
        .one(db)
        .await
        .map(|found| found.is_some())
        .map_err(|e| {
            tracing::error!(error = %e, "Failed uniqueness check");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error updating user")),
            )
                .into_response()
        })
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserStatusRequest {
    pub status: Option<String>,
}

/// PATCH /api/users/{user_id}/status
///
/// Approves or rejects a registration. ICTO Head only. `Active` approves the
/// account; `Rejected` deletes the record entirely — rejection is destructive
/// and not reversible.
///
/// ### Responses
/// - `200 OK` → approved user, or a confirmation message for rejection
/// - `400 Bad Request` → status is not `Active` or `Rejected`
/// - `404 Not Found` → no such user
pub async fn update_user_status(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserStatusRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match req.status.as_deref().map(str::parse::<UserStatus>) {
        Some(Ok(UserStatus::Active)) => match UserModel::set_status(db, user_id, UserStatus::Active).await {
            Ok(user) => (
                StatusCode::OK,
                Json(ApiResponse::success(
                    UserResponse::from(user),
                    "User approved successfully",
                )),
            )
                .into_response(),
            Err(sea_orm::DbErr::RecordNotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found.")),
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, user_id, "Failed to approve user");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::error("Error updating user status")),
                )
                    .into_response()
            }
        },
        Some(Ok(UserStatus::Rejected)) => match UserModel::delete(db, user_id).await {
            Ok(()) => (
                StatusCode::OK,
                Json(ApiResponse::success((), "User registration rejected.")),
            )
                .into_response(),
            Err(sea_orm::DbErr::RecordNotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found.")),
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, user_id, "Failed to reject user");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::error("Error updating user status")),
                )
                    .into_response()
            }
        },
        _ => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Invalid or missing status.")),
        )
            .into_response(),
    }
}
