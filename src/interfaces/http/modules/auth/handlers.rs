//! Authentication API handlers

use axum::{extract::State, Extension};

use super::dto::{LoginRequest, LoginResponse, UserInfo};
use crate::application::{Caller, UserService};
use crate::interfaces::http::common::{error_response, ok, ApiResponse, ApiResult, JsonBody};

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub users: UserService,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Malformed credentials"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account is inactive")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let auth = state
        .users
        .login(request.into())
        .await
        .map_err(error_response)?;
    ok(LoginResponse::from(auth))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/profile",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn profile(
    State(state): State<AuthHandlerState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<UserInfo> {
    let user = state.users.profile(&caller).await.map_err(error_response)?;
    ok(UserInfo::from(&user))
}
