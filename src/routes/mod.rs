use axum::Router;

use crate::state::SharedState;

pub mod catalog;
pub mod collection;
pub mod discover;
pub mod docs;
pub mod extract;
pub mod feed;
pub mod health;
pub mod lists;
pub mod users;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(catalog::router())
        .merge(users::router())
        .merge(collection::router())
        .merge(lists::router())
        .merge(discover::router())
        .merge(feed::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
