use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use crate::{
    model::{
        CrudRepository, PaginatableRepository, ResourceTyped,
        entity::{UserEntity, UserFlags},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        error::ErrorResponse,
        routes::{PaginationQuery, parse_id},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/page", get(users_page_handler))
        .route("/{id}/flags", put(users_flags_handler))
}

#[utoipa::path(
    get,
    path = "/admin/users/page",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Returns requested page", body = crate::model::Page<UserEntity>),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn users_page_handler(
    ctx: RequestContext,
    Query(page): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.admin_user()?;
    let users = UserEntity::page(state.pool(), user, page.limit(), page.offset())
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(users)))
}

#[utoipa::path(
    put,
    path = "/admin/users/{user_id}/flags",
    description = "Grants or revokes admin, verified and active",
    params(
        ("user_id" = i32, Path, description = "ID of the user")
    ),
    request_body = UserFlags,
    responses(
        (status = 200, description = "Flags updated", body = UserEntity),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn users_flags_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(flags): Json<UserFlags>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.admin_user()?;
    let id = parse_id(UserEntity::get_resource_type(), &raw_id)?;
    let found = UserEntity::find_by_id(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(UserEntity::get_resource_type()))?;

    let updated = found
        .set_flags(state.pool(), user, flags)
        .await
        .map_err(|e| WebError::resource_write_error(UserEntity::get_resource_type(), e))?;

    tracing::info!(
        "flags of {} set to {:?} by {}",
        updated.github_username(),
        updated.flags(),
        user.user_id()
    );
    Ok((StatusCode::OK, Json(updated)))
}
