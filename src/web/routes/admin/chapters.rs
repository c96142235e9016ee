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
        entity::{Chapter, ChapterCreate},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        error::ErrorResponse,
        routes::{PaginationQuery, parse_id},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(chapters_create_handler))
        .route("/page", get(chapters_page_handler))
        .route(
            "/{id}",
            get(chapters_get_handler)
                .put(chapters_update_handler)
                .delete(chapters_delete_handler),
        )
}

async fn find_chapter(state: &AppState, ctx: &RequestContext, raw_id: &str) -> WebResult<Chapter> {
    let user = ctx.admin_user()?;
    let id = parse_id(Chapter::get_resource_type(), raw_id)?;
    Chapter::find_by_id(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Chapter::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Chapter::get_resource_type()))
}

#[utoipa::path(
    get,
    path = "/admin/chapters/page",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Returns requested page", body = crate::model::Page<Chapter>),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn chapters_page_handler(
    ctx: RequestContext,
    Query(page): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.admin_user()?;
    let chapters = Chapter::page(state.pool(), user, page.limit(), page.offset())
        .await
        .map_err(|e| WebError::resource_fetch_error(Chapter::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(chapters)))
}

#[utoipa::path(
    get,
    path = "/admin/chapters/{chapter_id}",
    params(
        ("chapter_id" = i32, Path, description = "ID of the chapter")
    ),
    responses(
        (status = 200, description = "Chapter found", body = Chapter),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn chapters_get_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let chapter = find_chapter(&state, &ctx, &raw_id).await?;
    Ok((StatusCode::OK, Json(chapter)))
}

#[utoipa::path(
    post,
    path = "/admin/chapters",
    request_body = ChapterCreate,
    responses(
        (status = 201, description = "Chapter created", body = Chapter),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 409, description = "Order number or name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn chapters_create_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Json(payload): Json<ChapterCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.admin_user()?;
    let created = Chapter::create(state.pool(), user, payload)
        .await
        .map_err(|e| WebError::resource_write_error(Chapter::get_resource_type(), e))?;

    tracing::info!("chapter {} created", created.id());
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/admin/chapters/{chapter_id}",
    params(
        ("chapter_id" = i32, Path, description = "ID of the chapter")
    ),
    request_body = ChapterCreate,
    responses(
        (status = 200, description = "Chapter updated", body = Chapter),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse),
        (status = 409, description = "Order number or name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn chapters_update_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(payload): Json<ChapterCreate>,
) -> WebResult<impl IntoResponse> {
    let found = find_chapter(&state, &ctx, &raw_id).await?;
    let updated = found
        .update(state.pool(), ctx.admin_user()?, payload)
        .await
        .map_err(|e| WebError::resource_write_error(Chapter::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(updated)))
}

#[utoipa::path(
    delete,
    path = "/admin/chapters/{chapter_id}",
    description = "Deletes the chapter with its standards and lessons",
    params(
        ("chapter_id" = i32, Path, description = "ID of the chapter")
    ),
    responses(
        (status = 200, description = "Chapter deleted"),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn chapters_delete_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let found = find_chapter(&state, &ctx, &raw_id).await?;
    found
        .delete(state.pool(), ctx.admin_user()?)
        .await
        .map_err(|e| WebError::resource_write_error(Chapter::get_resource_type(), e))?;

    Ok(StatusCode::OK)
}
