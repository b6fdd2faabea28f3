//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::policy::{require_admin, Caller};
use crate::application::UserService;
use crate::domain::DomainError;
use crate::interfaces::http::common::error_response;

/// State for [`auth_middleware`]
#[derive(Clone)]
pub struct AuthState {
    pub users: UserService,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Bearer token authentication.
///
/// The account is reloaded on every request: a deleted user gets 401,
/// a deactivated one 403. On success the [`Caller`] is inserted into the
/// request extensions.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token)
        .map(String::from);

    let Some(token) = token else {
        return error_response(DomainError::Unauthorized("Access token required".into()))
            .into_response();
    };

    match auth_state.users.authenticate(&token).await {
        Ok(caller) => {
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        Err(e) => error_response(e).into_response(),
    }
}

/// Admin-only route guard. Must run inside [`auth_middleware`].
pub async fn admin_guard(request: Request<Body>, next: Next) -> Response {
    let Some(caller) = request.extensions().get::<Caller>() else {
        return error_response(DomainError::Unauthorized("Access token required".into()))
            .into_response();
    };

    if let Err(e) = require_admin(caller) {
        return error_response(e).into_response();
    }
    next.run(request).await
}
