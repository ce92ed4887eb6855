use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::provider::SearchProvider;

pub mod handlers;
pub mod models;

pub fn create_router<P>(provider: Arc<P>, static_dir: impl AsRef<Path>) -> Router
where
    P: SearchProvider + 'static,
{
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/search", get(handlers::search_handler::<P>))
        .with_state(provider)
        // Static file serving for the UI
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(cors)
}
