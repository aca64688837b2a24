//! Route registration.

pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers::components;
use crate::state::AppState;

/// All /api/v1 routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/components",
            get(components::list_components).post(components::create_component),
        )
        .route(
            "/components/{id}",
            get(components::get_component)
                .put(components::update_component)
                .delete(components::delete_component),
        )
}
