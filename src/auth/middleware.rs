//! Axum middleware for authentication and authorization.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, State},
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::{field, info_span, warn};

use crate::api::error::ApiError;
use crate::auth::principal::Principal;
use crate::auth::service::AuthService;

pub type AuthServiceState = Arc<AuthService>;
pub type RoleState = Arc<Vec<String>>;

/// Middleware entry point that authenticates requests using the configured
/// [`AuthService`] and attaches the resulting [`Principal`] to the request.
pub async fn authenticate(
    State(auth_service): State<AuthServiceState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let correlation_id = uuid::Uuid::new_v4();
    let span = info_span!(
        "auth_middleware.authenticate",
        http.method = %method,
        http.path = %path,
        auth.principal = field::Empty,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    let header =
        request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()).unwrap_or("");

    match auth_service.authenticate(header).await {
        Ok(principal) => {
            tracing::Span::current()
                .record("auth.principal", field::display(&principal.username));
            request.extensions_mut().insert(principal);
            Ok(next.run(request).await)
        }
        Err(err) => {
            warn!(%correlation_id, error = %err, "authentication failed");
            Err(ApiError::from(err))
        }
    }
}

/// Middleware entry point that verifies the caller holds at least one of the
/// allowed roles for the matched path family.
pub async fn ensure_roles(
    State(allowed_roles): State<RoleState>,
    Extension(principal): Extension<Principal>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let allowed_summary =
        allowed_roles.iter().map(|role| role.as_str()).collect::<Vec<_>>().join(" ");
    let granted_summary =
        principal.grants().map(|grant| grant.as_str()).collect::<Vec<_>>().join(" ");
    let correlation_id = uuid::Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = info_span!(
        "auth_middleware.ensure_roles",
        http.method = %method,
        http.path = %path,
        auth.principal = %principal.username,
        allowed_roles = %allowed_summary,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    if allowed_roles.iter().any(|role| principal.has_role(role)) {
        return Ok(next.run(request).await);
    }

    warn!(
        %correlation_id,
        allowed = %allowed_summary,
        granted = %granted_summary,
        "role check failed"
    );
    Err(ApiError::forbidden("Forbidden: insufficient role"))
}
