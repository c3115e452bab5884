//! Vitrine catalog server
//!
//! HTTP façade over the in-memory product catalog.

pub mod http;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use vitrine_catalog::Catalog;

/// Shared application state
pub struct AppState {
    pub catalog: Catalog,
}

impl AppState {
    /// State over the standard 10,000-product inventory.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::standard(),
        }
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/products", get(http::get_products))
        .route("/products/{id}", get(http::get_product))
        .route("/categories", get(http::get_categories))
        .route("/subcategories", get(http::get_subcategories))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Vitrine catalog server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
