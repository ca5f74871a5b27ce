use crate::auth::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::ticket::{Entity as TicketEntity, Model as TicketModel, TicketStatus};
use db::scope::visibility_filter;
use sea_orm::{Condition, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: u64,
    pub new: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

/// GET /api/analytics/dashboard-summary
///
/// Ticket counts over the caller's visibility scope: a regular employee sees
/// counts of their own tickets, a Department Head their office's, ICTO the
/// whole system.
pub async fn dashboard_summary(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();
    let scope = visibility_filter(claims.role(), &claims.name, claims.office());

    let result: Result<DashboardSummary, sea_orm::DbErr> = async {
        Ok(DashboardSummary {
            total: TicketEntity::find().filter(scope.clone()).count(db).await?,
            new: TicketModel::count_with_status(db, scope.clone(), TicketStatus::New).await?,
            in_progress: TicketModel::count_with_status(db, scope.clone(), TicketStatus::InProgress)
                .await?,
            resolved: TicketModel::count_with_status(db, scope.clone(), TicketStatus::Resolved)
                .await?,
        })
    }
    .await;

    match result {
        Ok(summary) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                summary,
                "Dashboard summary retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to compute dashboard summary");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DashboardSummary>::error(
                    "Error fetching dashboard summary",
                )),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainSummary {
    pub total_tickets: u64,
    pub new: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub closed: u64,
}

/// GET /api/analytics/summary
///
/// System-wide ticket counts. ICTO Head only (route guard).
pub async fn main_summary(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    let result: Result<MainSummary, sea_orm::DbErr> = async {
        Ok(MainSummary {
            total_tickets: TicketEntity::find().count(db).await?,
            new: TicketModel::count_with_status(db, Condition::all(), TicketStatus::New).await?,
            in_progress: TicketModel::count_with_status(db, Condition::all(), TicketStatus::InProgress)
                .await?,
            resolved: TicketModel::count_with_status(db, Condition::all(), TicketStatus::Resolved)
                .await?,
            closed: TicketModel::count_with_status(db, Condition::all(), TicketStatus::Closed)
                .await?,
        })
    }
    .await;

    match result {
        Ok(summary) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                summary,
                "Analytics summary retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to compute analytics summary");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<MainSummary>::error(
                    "Error fetching analytics summary",
                )),
            )
                .into_response()
        }
    }
}
