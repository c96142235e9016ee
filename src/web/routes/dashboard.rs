use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};

use crate::{
    curriculum::{JoinRow, build_curriculum},
    model::{
        CrudRepository, DatabaseError, ResourceType, ResourceTyped,
        entity::{Lesson, Message, MessageFeedRow, UserEntity},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::{progress::ProgressSummary, views::DashboardView},
        error::ErrorResponse,
        middlewares,
    },
};

const ACTIVITY_FEED_SIZE: i64 = 5;

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/ping", get(ping_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/ping",
    description = "Liveness probe",
    responses(
        (status = 200, description = "Server is up", body = String),
    ),
    tag = "views"
)]
pub async fn ping_handler() -> &'static str {
    "pong!"
}

#[utoipa::path(
    get,
    path = "/",
    description = "Dashboard: the curriculum tree, reading progress and the latest comments",
    responses(
        (status = 200, description = "Dashboard view", body = DashboardView),
        (status = 401, description = "You need to sign in", body = ErrorResponse),
        (status = 403, description = "Account unverified or inactive", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "views"
)]
pub async fn dashboard_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.learner()?;

    let fetch =
        |r#type: ResourceType| move |e: DatabaseError| WebError::resource_fetch_error(r#type, e);
    let (profile, rows, activity) = tokio::try_join!(
        async {
            UserEntity::find_by_id(state.pool(), user, user.user_id())
                .await
                .map_err(fetch(UserEntity::get_resource_type()))
        },
        async {
            JoinRow::fetch_all(state.pool(), user)
                .await
                .map_err(fetch(Lesson::get_resource_type()))
        },
        async {
            MessageFeedRow::latest(state.pool(), user, ACTIVITY_FEED_SIZE)
                .await
                .map_err(fetch(Message::get_resource_type()))
        },
    )?;

    let profile = profile.ok_or(WebError::auth_required())?;
    let chapters = build_curriculum(&rows);
    let progress = ProgressSummary::from_curriculum(&chapters);

    let view = DashboardView {
        user: profile,
        is_admin: user.is_admin(),
        chapters,
        progress,
        activity,
    };

    Ok((StatusCode::OK, Json(view)))
}
