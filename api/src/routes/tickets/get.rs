use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::tickets::common::{CommentResponse, TicketDetailResponse, TicketResponse};
use axum::{
    Extension,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use common::{escape_like, format_validation_errors, state::AppState};
use db::models::ticket::{
    Column as TicketColumn, Entity as TicketEntity, Model as TicketModel, TicketStatus,
};
use db::models::ticket_comment::Model as CommentModel;
use db::scope::visibility_filter;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ListTicketsQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsResponse {
    pub tickets: Vec<TicketResponse>,
    pub current_page: u64,
    pub total_pages: u64,
}

impl Default for ListTicketsResponse {
    fn default() -> Self {
        Self {
            tickets: Vec::new(),
            current_page: 1,
            total_pages: 0,
        }
    }
}

/// GET /api/tickets
///
/// Paginated list of tickets the caller may see. The caller's role-derived
/// scope filter is composed with the optional `status` filter (the sentinel
/// `All` disables it) and a case-insensitive substring `search` over subject
/// and description.
///
/// ### Query Parameters
/// - `page` (optional): 1-indexed page number (default: 1)
/// - `limit` (optional): page size (default: 10, max: 100)
/// - `status` (optional): one of `New`, `In Progress`, `Resolved`, `Closed`, `All`
/// - `search` (optional): substring match on subject or description
///
/// ### Responses
/// - `200 OK` → `{ "tickets": [...], "currentPage": 1, "totalPages": 3 }`
/// - `400 Bad Request` → invalid pagination or status value
/// - `401 Unauthorized` → missing or invalid JWT
pub async fn list_tickets(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(params): Query<ListTicketsQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = params.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ListTicketsResponse>::error(
                format_validation_errors(&e),
            )),
        )
            .into_response();
    }

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);

    // Role scope first; caller-supplied filters only narrow it further.
    let mut condition = visibility_filter(claims.role(), &claims.name, claims.office());

    if let Some(status) = params
        .status
        .as_deref()
        .filter(|s| !s.eq_ignore_ascii_case("All"))
    {
        match status.parse::<TicketStatus>() {
            Ok(status) => {
                condition = condition.add(TicketColumn::Status.eq(status));
            }
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<ListTicketsResponse>::error(
                        "Invalid status value",
                    )),
                )
                    .into_response();
            }
        }
    }

    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        // Escape LIKE wildcards so a search for "100%" matches literally.
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
        condition = condition.add(
            Condition::any()
                .add(Expr::cust_with_values(
                    "LOWER(subject) LIKE ? ESCAPE '\\'",
                    [pattern.clone()],
                ))
                .add(Expr::cust_with_values(
                    "LOWER(description) LIKE ? ESCAPE '\\'",
                    [pattern],
                )),
        );
    }

    // Most recent first; the id tie-break keeps page boundaries deterministic
    // when creation timestamps collide.
    let query = TicketEntity::find()
        .filter(condition)
        .order_by_desc(TicketColumn::CreatedAt)
        .order_by_desc(TicketColumn::Id);

    let paginator = query.paginate(db, limit);

    let total_pages = match paginator.num_pages().await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(error = %e, "Failed to count tickets");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ListTicketsResponse>::error(
                    "Error counting tickets",
                )),
            )
                .into_response();
        }
    };

    // A page past the end is not an error: empty list, correct totalPages.
    match paginator.fetch_page(page - 1).await {
        Ok(results) => {
            let tickets = results.into_iter().map(TicketResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ListTicketsResponse {
                        tickets,
                        current_page: page,
                        total_pages,
                    },
                    "Tickets retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch tickets");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ListTicketsResponse>::error(
                    "Failed to retrieve tickets",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/tickets/{ticket_id}
///
/// Single ticket with its full comment thread in insertion order.
///
/// ### Responses
/// - `200 OK` → ticket with `comments`
/// - `400 Bad Request` → malformed id (rejected before lookup)
/// - `404 Not Found` → no such ticket
pub async fn get_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
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
                Json(ApiResponse::<()>::error("Error fetching ticket details")),
            )
                .into_response();
        }
    };

    match CommentModel::find_all_for_ticket(db, ticket_id).await {
        Ok(comments) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TicketDetailResponse {
                    ticket: ticket.into(),
                    comments: comments.into_iter().map(CommentResponse::from).collect(),
                },
                "Ticket retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, ticket_id, "Failed to fetch comments");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Error fetching ticket details")),
            )
                .into_response()
        }
    }
}
