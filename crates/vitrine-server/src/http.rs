//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use vitrine_catalog::Product;
use vitrine_core::{CatalogQuery, Page};

use crate::AppState;

/// Paginated, filtered, sorted product listing.
///
/// An offset past the end of the filtered collection returns an empty
/// `products` array with the filtered `total`, never an error.
pub async fn get_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> Json<Page<Product>> {
    Json(state.catalog.query(&query))
}

/// Single product by id.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, (StatusCode, Json<serde_json::Value>)> {
    state
        .catalog
        .product_by_id(id)
        .cloned()
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Product not found" })),
        ))
}

/// Distinct categories across the inventory.
pub async fn get_categories(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.catalog.categories())
}

/// Query for the subcategory listing.
#[derive(Debug, Deserialize)]
pub struct SubcategoryQuery {
    pub category: Option<String>,
}

/// Distinct subcategories, optionally restricted to one category.
pub async fn get_subcategories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubcategoryQuery>,
) -> Json<Vec<String>> {
    Json(state.catalog.subcategories(query.category.as_deref()))
}
