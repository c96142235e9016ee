use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::web::middlewares::AUTH_TOKEN;

pub struct CookieAuthModifier;

impl Modify for CookieAuthModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(schema) = openapi.components.as_mut() {
            schema.add_security_scheme(
                "cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    AUTH_TOKEN,
                    "JWT session token for the signed-in user",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::auth::github_login_handler,
        crate::web::routes::auth::github_callback_handler,
        crate::web::routes::auth::log_out_handler,
        crate::web::routes::dashboard::ping_handler,
        crate::web::routes::dashboard::dashboard_handler,
        crate::web::routes::chapters::chapter_get_handler,
        crate::web::routes::lessons::lessons_get_handler,
        crate::web::routes::lessons::lessons_mark_read_handler,
        crate::web::routes::lessons::lessons_message_create_handler,
        crate::web::routes::messages::messages_update_handler,
        crate::web::routes::messages::messages_delete_handler,
        crate::web::routes::admin::chapters::chapters_page_handler,
        crate::web::routes::admin::chapters::chapters_get_handler,
        crate::web::routes::admin::chapters::chapters_create_handler,
        crate::web::routes::admin::chapters::chapters_update_handler,
        crate::web::routes::admin::chapters::chapters_delete_handler,
        crate::web::routes::admin::lessons::lessons_page_handler,
        crate::web::routes::admin::lessons::lessons_get_handler,
        crate::web::routes::admin::lessons::lessons_create_handler,
        crate::web::routes::admin::lessons::lessons_update_handler,
        crate::web::routes::admin::lessons::lessons_delete_handler,
        crate::web::routes::admin::standards::standards_page_handler,
        crate::web::routes::admin::standards::standards_get_handler,
        crate::web::routes::admin::standards::standards_create_handler,
        crate::web::routes::admin::standards::standards_update_handler,
        crate::web::routes::admin::standards::standards_delete_handler,
        crate::web::routes::admin::users::users_page_handler,
        crate::web::routes::admin::users::users_flags_handler,
    ),
    modifiers(&CookieAuthModifier),
)]
pub struct ApiDoc;
