use crate::{
    Config,
    curriculum::parse_order,
    model::ResourceType,
    web::{AppState, WebError, WebResult, doc::ApiDoc},
};
use axum::Router;
use serde::Deserialize;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod admin;
pub mod auth;
pub mod chapters;
pub mod dashboard;
pub mod lessons;
pub mod messages;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct PaginationQuery {
    /// Page size, 1..=100 (default 20)
    limit: Option<i64>,
    /// Items to skip (default 0)
    offset: Option<i64>,
}

/// Ids come in as raw path text and are parsed after the auth guard,
/// so anonymous callers see 401 and bad ids get a JSON 400.
pub(crate) fn parse_id(resource: ResourceType, raw: &str) -> WebResult<i32> {
    parse_order(raw).map_err(|e| WebError::resource_bad_request(resource, e.to_string()))
}

impl PaginationQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

pub fn build_app(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .merge(dashboard::routes(state.clone()))
        .nest("/auth", auth::routes(state.clone()))
        .nest("/chapter", chapters::routes(state.clone()))
        .nest("/lessons", lessons::routes(state.clone()))
        .nest("/messages", messages::routes(state.clone()))
        .nest("/admin", admin::routes(state.clone()))
        .layer(CookieManagerLayer::default())
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    if config.app().docs() {
        let openapi = ApiDoc::openapi();

        router = router.merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", openapi));
    }

    router
}
