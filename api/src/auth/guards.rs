//! Role-based access guards.
//!
//! Authorization is applied declaratively as route-group middleware rather
//! than repeated inline role checks in each handler. Every guard extracts the
//! caller once, inserts the `AuthUser` into request extensions for the
//! handler, and denies on any extraction or parse failure.

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Extracts and validates the user from the request, then re-inserts the
/// claims into extensions for downstream handlers.
async fn extract_and_insert_authuser(
    mut req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// ICTO-family guard (Staff or Head): status edits and attachment deletion.
pub async fn allow_icto(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.0.role().is_icto_family() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "Forbidden: You do not have permission to perform this action.",
            )),
        ));
    }

    Ok(next.run(req).await)
}

/// ICTO-Head-only guard: user management and system-wide analytics.
pub async fn allow_admin(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.0.role().is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "Forbidden: Access is restricted to administrators.",
            )),
        ));
    }

    Ok(next.run(req).await)
}
