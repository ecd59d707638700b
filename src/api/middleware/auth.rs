//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::CurrentUser;
use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the resolved [`CurrentUser`] is stored in the request
/// extensions, where handlers pick it up with `Extension<CurrentUser>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header is
/// missing or malformed, or the token is unknown or revoked.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Rejects callers whose role is not `admin`.
///
/// Must run after [`layer`]. A request without a [`CurrentUser`] is treated
/// as unauthenticated.
///
/// # Errors
///
/// Returns `401 Unauthorized` if no caller was resolved.
/// Returns `403 Forbidden` for non-admin callers.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req.extensions().get::<CurrentUser>().copied().ok_or_else(|| {
        AppError::unauthorized("Unauthorized", json!({"reason": "Not authenticated"}))
    })?;

    if !user.is_admin() {
        tracing::warn!("Non-admin user {} tried to access an admin route", user.id);
        return Err(AppError::forbidden(
            "Admin role required",
            json!({"role": user.role.as_str()}),
        ));
    }

    Ok(next.run(req).await)
}
