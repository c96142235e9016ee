use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::put,
};

use crate::{
    model::{
        CrudRepository, ResourceTyped, check_access,
        entity::{Message, MessageCreate},
    },
    web::{
        AppState, AuthenticatedUser, RequestContext, WebError, WebResult,
        dto::messages::{MessageUpdateBody, normalize_content},
        error::ErrorResponse,
        middlewares,
        routes::parse_id,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route(
            "/{id}",
            put(messages_update_handler).delete(messages_delete_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

/// Loads the message and checks that `user` wrote it (admins pass).
async fn owned_message(state: &AppState, user: &AuthenticatedUser, id: i32) -> WebResult<Message> {
    let found = Message::find_by_id(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Message::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Message::get_resource_type()))?;

    check_access(user, &found)
        .map_err(|e| WebError::resource_write_error(Message::get_resource_type(), e))?;

    Ok(found)
}

#[utoipa::path(
    put,
    path = "/messages/{message_id}",
    description = "Edits a comment. Only its author or an admin may do this",
    params(
        ("message_id" = i32, Path, description = "ID of the comment to edit")
    ),
    request_body = MessageUpdateBody,
    responses(
        (status = 200, description = "Comment updated", body = Message),
        (status = 400, description = "Empty content", body = ErrorResponse),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "Not your comment", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "messages"
)]
pub async fn messages_update_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(payload): Json<MessageUpdateBody>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.learner()?;
    let id = parse_id(Message::get_resource_type(), &raw_id)?;
    let found = owned_message(&state, user, id).await?;

    let content = normalize_content(&payload.content).ok_or(WebError::resource_bad_request(
        Message::get_resource_type(),
        "content is empty",
    ))?;

    let data = MessageCreate {
        content,
        parent_id: found.parent_id(),
        lesson_id: found.lesson_id(),
        user_id: found.user_id(),
    };
    let updated = found
        .update(state.pool(), user, data)
        .await
        .map_err(|e| WebError::resource_write_error(Message::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(updated)))
}

#[utoipa::path(
    delete,
    path = "/messages/{message_id}",
    description = "Deletes a comment together with its replies. Only its author or an admin may do this",
    params(
        ("message_id" = i32, Path, description = "ID of the comment to delete")
    ),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "Not your comment", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "messages"
)]
pub async fn messages_delete_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.learner()?;
    let id = parse_id(Message::get_resource_type(), &raw_id)?;
    let found = owned_message(&state, user, id).await?;

    found
        .delete(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_write_error(Message::get_resource_type(), e))?;

    Ok(StatusCode::OK)
}
