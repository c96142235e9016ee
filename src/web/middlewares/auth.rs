use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    Config, auth,
    model::{CrudRepository, ResourceTyped, entity::UserEntity},
    web::{
        AppState, RequestContext, context::AuthenticatedUser, error::WebError,
        routes::auth::removal_cookie,
    },
};

pub static AUTH_TOKEN: &str = "SID";

fn anonymous(mut req: Request) -> Request {
    req.extensions_mut().insert(RequestContext::new(None));
    req
}

pub async fn extract_context_fn(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = match cookies.get(AUTH_TOKEN) {
        Some(token) => token,
        None => return Ok(next.run(anonymous(req)).await),
    };

    let jwt = Config::get_or_init(false).await.app().jwt();
    let claims = match auth::process_token(token.value(), jwt) {
        Ok(claims) => claims,
        Err(e) => {
            // expired or forged sessions count as signed out
            tracing::warn!("dropping session cookie: {e}");
            cookies.remove(removal_cookie(AUTH_TOKEN));
            return Ok(next.run(anonymous(req)).await);
        }
    };

    let Some(id) = claims.claims.user_id() else {
        tracing::warn!("session subject is not a user id: {}", claims.claims.sub);
        return Ok(next.run(anonymous(req)).await);
    };

    let user = UserEntity::find_by_id(state.pool(), &AuthenticatedUser::admin(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    match user {
        Some(user) => {
            req.extensions_mut()
                .insert(RequestContext::new(Some(user.to_authenticated())));
            Ok(next.run(req).await)
        }
        None => Ok(next.run(anonymous(req)).await),
    }
}
