use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    curriculum::{JoinRow, build_curriculum, thread_messages},
    model::{
        CrudRepository, ResourceTyped,
        entity::{Lesson, LessonRead, Message, MessageCreate, MessageWithAuthor},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::{
            messages::{MessageCreateBody, ReadQuery, normalize_content},
            views::LessonView,
        },
        error::ErrorResponse,
        middlewares,
        routes::parse_id,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/{id}", get(lessons_get_handler))
        .route("/{id}/read", post(lessons_mark_read_handler))
        .route("/{id}/messages", post(lessons_message_create_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/lessons/{lesson_id}",
    description = "Lesson page: the lesson, the sidebar tree and the threaded comments",
    params(
        ("lesson_id" = i32, Path, description = "ID of the lesson to show")
    ),
    responses(
        (status = 200, description = "Lesson view", body = LessonView),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "Account unverified or inactive", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "views"
)]
pub async fn lessons_get_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.learner()?;
    let id = parse_id(Lesson::get_resource_type(), &raw_id)?;
    let lesson = Lesson::find_active(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Lesson::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Lesson::get_resource_type()))?;

    let (rows, messages, read) = tokio::try_join!(
        JoinRow::fetch_all(state.pool(), user),
        MessageWithAuthor::all_by_lesson(state.pool(), user, id),
        LessonRead::find(state.pool(), user, id),
    )
    .map_err(|e| WebError::resource_fetch_error(Lesson::get_resource_type(), e))?;

    let view = LessonView {
        sidebar: build_curriculum(&rows),
        lesson,
        read: read.is_some_and(|r| r.read()),
        comments: thread_messages(messages),
    };

    Ok((StatusCode::OK, Json(view)))
}

#[utoipa::path(
    post,
    path = "/lessons/{lesson_id}/read",
    description = "Marks the lesson as read or unread for the current user",
    params(
        ("lesson_id" = i32, Path, description = "ID of the lesson to mark"),
        ReadQuery,
    ),
    responses(
        (status = 200, description = "Lesson marked", body = LessonRead),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "Account unverified or inactive", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "lessons"
)]
pub async fn lessons_mark_read_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<ReadQuery>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.learner()?;
    let id = parse_id(Lesson::get_resource_type(), &raw_id)?;
    let exists = Lesson::find_active(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Lesson::get_resource_type(), e))?
        .is_some();

    if !exists {
        return Err(WebError::resource_not_found(Lesson::get_resource_type()));
    }

    let mark = LessonRead::set(state.pool(), user, id, query.read)
        .await
        .map_err(|e| WebError::resource_write_error(LessonRead::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(mark)))
}

#[utoipa::path(
    post,
    path = "/lessons/{lesson_id}/messages",
    description = "Posts a comment on the lesson, or a reply when `parent_id` is given",
    params(
        ("lesson_id" = i32, Path, description = "ID of the lesson to comment on")
    ),
    request_body = MessageCreateBody,
    responses(
        (status = 201, description = "Comment created", body = Message),
        (status = 400, description = "Empty content or invalid parent", body = ErrorResponse),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "Account unverified or inactive", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "messages"
)]
pub async fn lessons_message_create_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(payload): Json<MessageCreateBody>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.learner()?;
    let id = parse_id(Lesson::get_resource_type(), &raw_id)?;
    let resource = Message::get_resource_type();

    let exists = Lesson::find_active(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Lesson::get_resource_type(), e))?
        .is_some();
    if !exists {
        return Err(WebError::resource_not_found(Lesson::get_resource_type()));
    }

    let content = normalize_content(&payload.content)
        .ok_or(WebError::resource_bad_request(resource.clone(), "content is empty"))?;

    if let Some(parent_id) = payload.parent_id {
        let parent = Message::find_by_id(state.pool(), user, parent_id)
            .await
            .map_err(|e| WebError::resource_fetch_error(resource.clone(), e))?
            .ok_or(WebError::resource_bad_request(resource.clone(), "parent message does not exist"))?;

        if parent.lesson_id() != id {
            return Err(WebError::resource_bad_request(
                resource,
                "parent message belongs to another lesson",
            ));
        }
        if parent.parent_id().is_some() {
            return Err(WebError::resource_bad_request(
                resource,
                "replies cannot be answered",
            ));
        }
    }

    let data = MessageCreate {
        content,
        parent_id: payload.parent_id,
        lesson_id: id,
        user_id: user.user_id(),
    };
    let message = Message::create(state.pool(), user, data)
        .await
        .map_err(|e| WebError::resource_write_error(Message::get_resource_type(), e))?;

    Ok((StatusCode::CREATED, Json(message)))
}
