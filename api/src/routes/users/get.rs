use crate::response::ApiResponse;
use crate::routes::users::common::UserResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{escape_like, format_validation_errors, state::AppState};
use db::models::user::{Column as UserColumn, Entity as UserEntity, Role, UserStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub current_page: u64,
    pub total_pages: u64,
}

impl Default for ListUsersResponse {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            current_page: 1,
            total_pages: 0,
        }
    }
}

/// GET /api/users
///
/// Paginated user directory, sorted by name. ICTO Head only.
///
/// ### Query Parameters
/// - `page` (optional): 1-indexed page number (default: 1)
/// - `limit` (optional): page size (default: 10, max: 100)
/// - `status` (optional): `Pending` | `Active` | `Rejected`
/// - `role` (optional): exact role name
/// - `query` (optional): case-insensitive match on name, email or employee id
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(params): Query<ListUsersQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = params.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ListUsersResponse>::error(
                format_validation_errors(&e),
            )),
        )
            .into_response();
    }

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);

    let mut condition = Condition::all();

    if let Some(status) = params.status.as_deref() {
        match status.parse::<UserStatus>() {
            Ok(status) => condition = condition.add(UserColumn::Status.eq(status)),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<ListUsersResponse>::error(
                        "Invalid status value",
                    )),
                )
                    .into_response();
            }
        }
    }

    if let Some(role) = params.role.as_deref() {
        match role.parse::<Role>() {
            Ok(role) => condition = condition.add(UserColumn::Role.eq(role)),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<ListUsersResponse>::error("Invalid role value")),
                )
                    .into_response();
            }
        }
    }

    if let Some(q) = params.query.as_deref().filter(|q| !q.is_empty()) {
        let pattern = format!("%{}%", escape_like(&q.to_lowercase()));
        condition = condition.add(
            Condition::any()
                .add(Expr::cust_with_values(
                    "LOWER(name) LIKE ? ESCAPE '\\'",
                    [pattern.clone()],
                ))
                .add(Expr::cust_with_values(
                    "LOWER(email) LIKE ? ESCAPE '\\'",
                    [pattern.clone()],
                ))
                .add(Expr::cust_with_values(
                    "LOWER(employee_id) LIKE ? ESCAPE '\\'",
                    [pattern],
                )),
        );
    }

    let paginator = UserEntity::find()
        .filter(condition)
        .order_by_asc(UserColumn::Name)
        .paginate(db, limit);

    let total_pages = match paginator.num_pages().await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(error = %e, "Failed to count users");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ListUsersResponse>::error("Error fetching users")),
            )
                .into_response();
        }
    };

    match paginator.fetch_page(page - 1).await {
        Ok(users) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ListUsersResponse {
                    users: users.into_iter().map(UserResponse::from).collect(),
                    current_page: page,
                    total_pages,
                },
                "Users retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch users");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ListUsersResponse>::error("Error fetching users")),
            )
                .into_response()
        }
    }
}

/// GET /api/users/{user_id}
///
/// Single user by id. ICTO Head only.
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserEntity::find_by_id(user_id).one(db).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("User not found.")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id, "Failed to fetch user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error fetching user")),
            )
                .into_response()
        }
    }
}
