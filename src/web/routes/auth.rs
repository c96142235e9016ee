use axum::{
    Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
};
use serde::Deserialize;
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use uuid::Uuid;

use crate::{
    Config, auth,
    model::{ResourceTyped, entity::UserEntity},
    web::{AppState, AuthenticatedUser, WebError, WebResult, error::ErrorResponse, middlewares::AUTH_TOKEN},
};

pub static OAUTH_STATE: &str = "oauth_state";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CallbackQuery {
    /// Authorization code issued by GitHub
    pub code: String,
    /// Value of the `state` parameter sent with the authorize redirect
    pub state: String,
}

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/github", get(github_login_handler))
        .route("/github/callback", get(github_callback_handler))
        .route("/log_out", get(log_out_handler))
        .with_state(state)
}

fn http_only_cookie(name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie
}

pub(crate) fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::from(name);
    cookie.set_path("/");
    cookie
}

#[utoipa::path(
    get,
    path = "/auth/github",
    description = "Starts the GitHub login: sets the `oauth_state` cookie and redirects to GitHub",
    responses(
        (status = 303, description = "Redirect to the GitHub authorize page"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn github_login_handler(
    State(state): State<AppState>,
    cookies: Cookies,
) -> WebResult<impl IntoResponse> {
    let csrf = Uuid::new_v4().to_string();
    let url = state
        .identity()
        .authorize_url(&csrf)
        .map_err(WebError::server_oauth_error)?;

    cookies.add(http_only_cookie(OAUTH_STATE, csrf));

    Ok(Redirect::to(url.as_str()))
}

#[utoipa::path(
    get,
    path = "/auth/github/callback",
    description = "Completes the GitHub login, creates or refreshes the account and sets the `SID` cookie",
    params(CallbackQuery),
    responses(
        (status = 303, description = "Signed in, redirect to the dashboard"),
        (status = 400, description = "State mismatch", body = ErrorResponse),
        (status = 502, description = "GitHub rejected the login", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "auth"
)]
#[tracing::instrument(skip_all)]
pub async fn github_callback_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<CallbackQuery>,
) -> WebResult<impl IntoResponse> {
    let expected = cookies.get(OAUTH_STATE).map(|c| c.value().to_string());
    cookies.remove(removal_cookie(OAUTH_STATE));

    if expected.as_deref() != Some(query.state.as_str()) {
        return Err(WebError::auth_state_mismatch());
    }

    let profile = state
        .identity()
        .exchange_code(&query.code)
        .await
        .map_err(WebError::server_oauth_error)?;

    let user = UserEntity::upsert_from_profile(state.pool(), &AuthenticatedUser::admin(), &profile)
        .await
        .map_err(|e| WebError::resource_write_error(UserEntity::get_resource_type(), e))?;

    let jwt_token = Config::get_or_init(false).await.app().jwt();
    let token = auth::issue_session_token(user.id(), jwt_token)
        .map_err(|e| WebError::server_crypt_error(e.into()))?;
    cookies.add(http_only_cookie(AUTH_TOKEN, token));

    tracing::info!("user {} signed in", user.github_username());
    Ok(Redirect::to("/"))
}

#[utoipa::path(
    get,
    path = "/auth/log_out",
    description = "Drops the session cookie",
    responses(
        (status = 303, description = "Signed out, redirect to the dashboard"),
    ),
    tag = "auth"
)]
pub async fn log_out_handler(cookies: Cookies) -> impl IntoResponse {
    cookies.remove(removal_cookie(AUTH_TOKEN));
    Redirect::to("/")
}
