use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::app::AppState;
use crate::error::ApiError;

/// Authentication gate for protected routes.
///
/// Runs the configured verifier and injects the resulting `Claims` into the
/// request; anything without valid claims stops here with a 401 before any
/// handler or store is reached.
pub async fn require_claims(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();

    let claims = state
        .verifier
        .verify(&parts.headers)
        .await
        .ok_or(ApiError::Unauthorized)?;

    parts.extensions.insert(claims);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
