use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::auth_service::ListUsersResult;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::auth::UserDto;
use crate::presentation::middleware::auth::CurrentUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ListUsersQuery {
    pub(crate) skip: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListUsersResponseDto {
    pub(crate) results: Vec<UserDto>,
    pub(crate) skip: i64,
    pub(crate) limit: i64,
    pub(crate) total: i64,
}

impl From<ListUsersResult> for ListUsersResponseDto {
    fn from(result: ListUsersResult) -> Self {
        Self {
            results: result.results.into_iter().map(UserDto::from).collect(),
            skip: result.skip,
            limit: result.limit,
            total: result.total,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("skip" = Option<i64>, Query, description = "Offset from the beginning (>= 0)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1..=100)")
    ),
    responses(
        (status = 200, description = "Users listed", body = ListUsersResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    _auth: CurrentUser,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<(StatusCode, Json<ListUsersResponseDto>)> {
    query.validate()?;
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(10);

    let result = state.auth_service.list_users(skip, limit).await?;

    Ok((StatusCode::OK, Json(ListUsersResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.auth_service.get_user(id).await?;

    Ok((StatusCode::OK, Json(UserDto::from(user))))
}
