use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    model::{
        CrudRepository, PaginatableRepository, ResourceTyped,
        entity::{Standard, StandardCreate},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        error::ErrorResponse,
        routes::{PaginationQuery, parse_id},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(standards_create_handler))
        .route("/page", get(standards_page_handler))
        .route(
            "/{id}",
            get(standards_get_handler)
                .put(standards_update_handler)
                .delete(standards_delete_handler),
        )
}

async fn find_standard(state: &AppState, ctx: &RequestContext, raw_id: &str) -> WebResult<Standard> {
    let user = ctx.admin_user()?;
    let id = parse_id(Standard::get_resource_type(), raw_id)?;
    Standard::find_by_id(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Standard::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Standard::get_resource_type()))
}

#[utoipa::path(
    get,
    path = "/admin/standards/page",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Returns requested page", body = crate::model::Page<Standard>),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn standards_page_handler(
    ctx: RequestContext,
    Query(page): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.admin_user()?;
    let standards = Standard::page(state.pool(), user, page.limit(), page.offset())
        .await
        .map_err(|e| WebError::resource_fetch_error(Standard::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(standards)))
}

#[utoipa::path(
    get,
    path = "/admin/standards/{standard_id}",
    params(
        ("standard_id" = i32, Path, description = "ID of the standard")
    ),
    responses(
        (status = 200, description = "Standard found", body = Standard),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "Standard not found", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn standards_get_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let standard = find_standard(&state, &ctx, &raw_id).await?;
    Ok((StatusCode::OK, Json(standard)))
}

#[utoipa::path(
    post,
    path = "/admin/standards",
    request_body = StandardCreate,
    responses(
        (status = 201, description = "Standard created", body = Standard),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 400, description = "Chapter does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn standards_create_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Json(payload): Json<StandardCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.admin_user()?;
    let created = Standard::create(state.pool(), user, payload)
        .await
        .map_err(|e| WebError::resource_write_error(Standard::get_resource_type(), e))?;

    tracing::info!("standard {} created", created.id());
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/admin/standards/{standard_id}",
    params(
        ("standard_id" = i32, Path, description = "ID of the standard")
    ),
    request_body = StandardCreate,
    responses(
        (status = 200, description = "Standard updated", body = Standard),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "Standard not found", body = ErrorResponse),
        (status = 400, description = "Chapter does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn standards_update_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(payload): Json<StandardCreate>,
) -> WebResult<impl IntoResponse> {
    let found = find_standard(&state, &ctx, &raw_id).await?;
    let updated = found
        .update(state.pool(), ctx.admin_user()?, payload)
        .await
        .map_err(|e| WebError::resource_write_error(Standard::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(updated)))
}

#[utoipa::path(
    delete,
    path = "/admin/standards/{standard_id}",
    params(
        ("standard_id" = i32, Path, description = "ID of the standard")
    ),
    responses(
        (status = 200, description = "Standard deleted"),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "Standard not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn standards_delete_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let found = find_standard(&state, &ctx, &raw_id).await?;
    found
        .delete(state.pool(), ctx.admin_user()?)
        .await
        .map_err(|e| WebError::resource_write_error(Standard::get_resource_type(), e))?;

    Ok(StatusCode::OK)
}
