use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Catalog
        .route(
            "/api/catalogo",
            get(handlers::list_catalog::<S>).post(handlers::create_catalog_item::<S>),
        )
        .route("/api/catalogo/:id", delete(handlers::delete_catalog_item::<S>))
        // Matrices
        .route(
            "/api/matrices",
            get(handlers::list_matrices::<S>).post(handlers::create_matrix::<S>),
        )
        .route(
            "/api/matrices/:id",
            put(handlers::update_matrix::<S>).delete(handlers::delete_matrix::<S>),
        )
        // Browser frontends are served from other origins
        .layer(CorsLayer::permissive())
}
