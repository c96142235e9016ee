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
        entity::{Lesson, LessonCreate},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        error::ErrorResponse,
        routes::{PaginationQuery, parse_id},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(lessons_create_handler))
        .route("/page", get(lessons_page_handler))
        .route(
            "/{id}",
            get(lessons_get_handler)
                .put(lessons_update_handler)
                .delete(lessons_delete_handler),
        )
}

async fn find_lesson(state: &AppState, ctx: &RequestContext, raw_id: &str) -> WebResult<Lesson> {
    let user = ctx.admin_user()?;
    let id = parse_id(Lesson::get_resource_type(), raw_id)?;
    Lesson::find_by_id(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Lesson::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Lesson::get_resource_type()))
}

#[utoipa::path(
    get,
    path = "/admin/lessons/page",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Returns requested page", body = crate::model::Page<Lesson>),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn lessons_page_handler(
    ctx: RequestContext,
    Query(page): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.admin_user()?;
    let lessons = Lesson::page(state.pool(), user, page.limit(), page.offset())
        .await
        .map_err(|e| WebError::resource_fetch_error(Lesson::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(lessons)))
}

#[utoipa::path(
    get,
    path = "/admin/lessons/{lesson_id}",
    params(
        ("lesson_id" = i32, Path, description = "ID of the lesson")
    ),
    responses(
        (status = 200, description = "Lesson found", body = Lesson),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn lessons_get_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let lesson = find_lesson(&state, &ctx, &raw_id).await?;
    Ok((StatusCode::OK, Json(lesson)))
}

#[utoipa::path(
    post,
    path = "/admin/lessons",
    request_body = LessonCreate,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 400, description = "Chapter does not exist", body = ErrorResponse),
        (status = 409, description = "Order number or name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn lessons_create_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Json(payload): Json<LessonCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.admin_user()?;
    let created = Lesson::create(state.pool(), user, payload)
        .await
        .map_err(|e| WebError::resource_write_error(Lesson::get_resource_type(), e))?;

    tracing::info!("lesson {} created", created.id());
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/admin/lessons/{lesson_id}",
    params(
        ("lesson_id" = i32, Path, description = "ID of the lesson")
    ),
    request_body = LessonCreate,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 400, description = "Chapter does not exist", body = ErrorResponse),
        (status = 409, description = "Order number or name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn lessons_update_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(payload): Json<LessonCreate>,
) -> WebResult<impl IntoResponse> {
    let found = find_lesson(&state, &ctx, &raw_id).await?;
    let updated = found
        .update(state.pool(), ctx.admin_user()?, payload)
        .await
        .map_err(|e| WebError::resource_write_error(Lesson::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(updated)))
}

#[utoipa::path(
    delete,
    path = "/admin/lessons/{lesson_id}",
    description = "Deletes the lesson with its comments and read marks",
    params(
        ("lesson_id" = i32, Path, description = "ID of the lesson")
    ),
    responses(
        (status = 200, description = "Lesson deleted"),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 403, description = "You're not an admin", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "admin"
)]
pub async fn lessons_delete_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let found = find_lesson(&state, &ctx, &raw_id).await?;
    found
        .delete(state.pool(), ctx.admin_user()?)
        .await
        .map_err(|e| WebError::resource_write_error(Lesson::get_resource_type(), e))?;

    Ok(StatusCode::OK)
}
