use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::api::{accept_version, handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // One resource route pair serves every kind; unknown kinds 404
        .route(
            "/:resource",
            get(handlers::list_resources::<S>).post(handlers::create_resource::<S>),
        )
        .route(
            "/:resource/:id",
            get(handlers::get_resource::<S>)
                .put(handlers::replace_resource::<S>)
                .delete(handlers::delete_resource::<S>),
        )
        .layer(middleware::from_fn(accept_version::check_headers))
        // Static demo assets, like the course server's public/ folder
        .nest_service("/public", ServeDir::new("public"))
}
