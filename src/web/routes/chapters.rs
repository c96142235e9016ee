use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};

use crate::{
    curriculum::{JoinRow, build_curriculum, next_chapter, previous_chapter},
    model::{
        CrudRepository, ResourceTyped,
        entity::{Chapter, ChapterWithStatus, Standard},
    },
    web::{
        AppState, RequestContext, WebError, WebResult, dto::views::ChapterView,
        error::ErrorResponse, middlewares,
        routes::parse_id,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/{id}", get(chapter_get_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/chapter/{chapter_id}",
    description = "Chapter page: standards, lessons, the sidebar tree and the neighbouring chapters",
    params(
        ("chapter_id" = i32, Path, description = "ID of the chapter to show")
    ),
    responses(
        (status = 200, description = "Chapter view", body = ChapterView),
        (status = 400, description = "Chapter id is not a number", body = ErrorResponse),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "Account unverified or inactive", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "views"
)]
pub async fn chapter_get_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.learner()?;
    let id = parse_id(Chapter::get_resource_type(), &raw_id)?;

    let chapter = Chapter::find_by_id(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Chapter::get_resource_type(), e))?
        .filter(Chapter::is_active)
        .ok_or(WebError::resource_not_found(Chapter::get_resource_type()))?;

    let (standards, rows, statuses) = tokio::try_join!(
        Standard::all_by_chapter(state.pool(), user, chapter.id()),
        JoinRow::fetch_all(state.pool(), user),
        ChapterWithStatus::fetch_all(state.pool(), user),
    )
    .map_err(|e| WebError::resource_fetch_error(Chapter::get_resource_type(), e))?;

    let sidebar = build_curriculum(&rows);
    let lessons = sidebar
        .iter()
        .find(|c| c.chapter_id == chapter.id())
        .map(|c| c.lessons.clone())
        .unwrap_or_default();

    let previous = previous_chapter(chapter.order_number(), &statuses)
        .into_iter()
        .cloned()
        .collect();
    let next = next_chapter(chapter.order_number(), &statuses)
        .into_iter()
        .cloned()
        .collect();

    let view = ChapterView {
        chapter,
        standards,
        lessons,
        sidebar,
        previous,
        next,
    };

    Ok((StatusCode::OK, Json(view)))
}
