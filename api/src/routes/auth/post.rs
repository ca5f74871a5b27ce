use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::users::common::UserResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::{format_validation_errors, state::AppState};
use db::models::user::{Model as UserModel, Role, UserStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "employeeId is required"))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "employmentType is required"))]
    pub employment_type: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    #[validate(length(min = 1, message = "office is required"))]
    pub office: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// POST /api/auth/register
///
/// Self-registration. The account is created in `Pending` state and cannot
/// authenticate until an ICTO Head approves it. The administrative role
/// cannot be self-granted.
///
/// ### Responses
/// - `201 Created` → confirmation message
/// - `400 Bad Request` → missing fields, weak password, or admin role requested
/// - `409 Conflict` → employee id or email already registered
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let role = match req.role.parse::<Role>() {
        Ok(role) if !role.is_admin() => role,
        Ok(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(
                    "Administrator accounts cannot be self-registered.",
                )),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error("Invalid role value")),
            )
                .into_response();
        }
    };

    match UserModel::find_by_employee_id(db, &req.employee_id).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<()>::error("Employee ID already registered.")),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed employee id lookup");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error registering user")),
            )
                .into_response();
        }
    }

    match UserModel::find_by_email(db, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<()>::error("Email address already registered.")),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed email lookup");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error registering user")),
            )
                .into_response();
        }
    }

    match UserModel::create(
        db,
        Some(&req.employee_id),
        &req.employment_type,
        &req.name,
        role,
        Some(&req.office),
        &req.email,
        &req.password,
        UserStatus::Pending,
    )
    .await
    {
        Ok(_) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                (),
                "User registered successfully! Awaiting approval.",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error registering user")),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub employee_id: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

/// POST /api/auth/login
///
/// Verifies credentials and issues a bearer token carrying the identity
/// snapshot (name, role, office, email) that the access scope resolver
/// consumes downstream.
///
/// ### Responses
/// - `200 OK` → `{ token, expiresAt, user }`
/// - `400 Bad Request` → missing employee id or password
/// - `401 Unauthorized` → unknown employee id or wrong password
/// - `403 Forbidden` → account is not `Active` (pending or rejected)
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let (Some(employee_id), Some(password)) = (req.employee_id.as_deref(), req.password.as_deref())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                "Employee ID and password are required.",
            )),
        )
            .into_response();
    };

    let user = match UserModel::find_by_employee_id(db, employee_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<()>::error("Invalid credentials.")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed login lookup");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error logging in")),
            )
                .into_response();
        }
    };

    if !user.verify_password(password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error("Invalid credentials.")),
        )
            .into_response();
    }

    if user.status != UserStatus::Active {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error(
                "Account is not active. Awaiting administrator approval.",
            )),
        )
            .into_response();
    }

    let (token, expires_at) = generate_jwt(&user);

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LoginResponse {
                token,
                expires_at,
                user: user.into(),
            },
            "Logged in successfully",
        )),
    )
        .into_response()
}
