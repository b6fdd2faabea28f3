//! Vacation request API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateVacationRequest, UpdateVacationRequest, VacationDto};
use crate::application::{Caller, VacationService};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, JsonBody,
};

#[derive(Clone)]
pub struct VacationHandlerState {
    pub vacations: VacationService,
}

#[utoipa::path(
    get,
    path = "/api/v1/vacations",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All records for admins, own records otherwise; newest start date first", body = ApiResponse<Vec<VacationDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_vacations(
    State(state): State<VacationHandlerState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Vec<VacationDto>> {
    let items = state.vacations.list(&caller).await.map_err(error_response)?;
    ok(items.into_iter().map(VacationDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/vacations/{id}",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Vacation request ID")),
    responses(
        (status = 200, description = "Vacation request", body = ApiResponse<VacationDto>),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vacation(
    State(state): State<VacationHandlerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ApiResult<VacationDto> {
    let vacation = state.vacations.get(&caller, &id).await.map_err(error_response)?;
    ok(VacationDto::from(vacation))
}

#[utoipa::path(
    post,
    path = "/api/v1/vacations",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    request_body = CreateVacationRequest,
    responses(
        (status = 201, description = "Created with status pending", body = ApiResponse<VacationDto>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_vacation(
    State(state): State<VacationHandlerState>,
    Extension(caller): Extension<Caller>,
    JsonBody(request): JsonBody<CreateVacationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VacationDto>>), ApiError> {
    let vacation = state
        .vacations
        .create(&caller, request.into())
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VacationDto::from(vacation))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/vacations/{id}",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Vacation request ID")),
    request_body = UpdateVacationRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<VacationDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Access denied, or status change by a non-admin"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_vacation(
    State(state): State<VacationHandlerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateVacationRequest>,
) -> ApiResult<VacationDto> {
    let vacation = state
        .vacations
        .update(&caller, &id, request.into())
        .await
        .map_err(error_response)?;
    ok(VacationDto::from(vacation))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vacations/{id}",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Vacation request ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_vacation(
    State(state): State<VacationHandlerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .vacations
        .delete(&caller, &id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
