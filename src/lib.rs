pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod store;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full router. Per-request pipeline order: origin guard, then
/// (for admin routes) the authorization gate, then the mutation guard inside
/// each write handler, then the store.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(handlers::root))
        .route("/products", get(handlers::products::list))
        .route("/categories", get(handlers::categories::list));

    let admin = Router::new()
        .route("/products", post(handlers::products::create))
        .route(
            "/products/:id",
            put(handlers::products::update).delete(handlers::products::remove),
        )
        .route("/categories", post(handlers::categories::create))
        .route("/categories/:name", delete(handlers::categories::remove))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_admin));

    Router::new()
        .merge(public)
        .merge(admin)
        // Global middleware, outermost last: trace -> cors -> origin guard
        .layer(from_fn_with_state(state.clone(), middleware::origin_guard))
        .layer(middleware::cors_layer(state.origin_policy.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
