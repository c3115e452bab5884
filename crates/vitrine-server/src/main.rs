//! Vitrine Server Binary
//!
//! Standalone HTTP server for the mock product catalog.

use std::sync::Arc;

use vitrine_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let state = Arc::new(AppState::new());
    let addr = std::env::var("VITRINE_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    serve(&addr, state).await
}
