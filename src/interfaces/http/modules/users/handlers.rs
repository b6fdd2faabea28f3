//! User management API handlers
//!
//! Admin-only CRUD endpoints. The router wraps them in the admin guard;
//! `UserService` re-checks the role.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::application::{Caller, UserService};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, JsonBody,
};

#[derive(Clone)]
pub struct UserHandlerState {
    pub users: UserService,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User list", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Vec<UserDto>> {
    let users = state.users.list_users(&caller).await.map_err(error_response)?;
    ok(users.into_iter().map(UserDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ApiResult<UserDto> {
    let user = state.users.get_user(&caller, &id).await.map_err(error_response)?;
    ok(UserDto::from(user))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<Caller>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let user = state
        .users
        .create_user(&caller, request.into())
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    let user = state
        .users
        .update_user(&caller, &id, request.into())
        .await
        .map_err(error_response)?;
    ok(UserDto::from(user))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Default admin cannot be deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .users
        .delete_user(&caller, &id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
