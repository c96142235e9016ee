//! Curriculum and account administration. Every handler requires an admin.

use axum::{Router, middleware};

use crate::web::{AppState, middlewares};

pub mod chapters;
pub mod lessons;
pub mod standards;
pub mod users;

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .nest("/chapters", chapters::routes())
        .nest("/lessons", lessons::routes())
        .nest("/standards", standards::routes())
        .nest("/users", users::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}
