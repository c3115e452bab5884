//! In-memory catalog with filtered, sorted, paginated queries

use std::cmp::Ordering;

use uuid::Uuid;
use vitrine_core::{CatalogQuery, CatalogSource, Page, SortKey, SortOrder, SourceError};

use crate::product::{generate_products, Product};

/// Number of products in the standard inventory.
pub const STANDARD_INVENTORY: usize = 10_000;

const DEFAULT_SEED: u64 = 0x5eed_ca7a;

/// Fixed collection of products answering paginated queries.
///
/// Ordering is fully determined by the sort parameters (ties broken by
/// the stable sort keeping generation order), so identical queries
/// always return identical pages — the property the loader's
/// index-addressed cache depends on.
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Inventory generated from an explicit seed, for tests.
    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::new(generate_products(count, seed))
    }

    /// The standard 10,000-product inventory.
    pub fn standard() -> Self {
        let catalog = Self::seeded(STANDARD_INVENTORY, DEFAULT_SEED);
        tracing::info!(count = catalog.len(), "generated catalog inventory");
        catalog
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Answer one paginated query. An offset past the end of the
    /// filtered collection yields an empty page, never an error.
    pub fn query(&self, query: &CatalogQuery) -> Page<Product> {
        let mut filtered: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| Self::matches(p, query))
            .collect();

        filtered.sort_by(|a, b| {
            let ordering = match query.sort {
                SortKey::Name => a.name.cmp(&b.name),
                SortKey::Price => total_cmp(a.price, b.price),
                SortKey::Rating => total_cmp(a.rating, b.rating),
                SortKey::Stock => a.stock.cmp(&b.stock),
                SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = filtered.len();
        let products = filtered
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect();

        Page {
            total,
            limit: query.limit,
            offset: query.offset,
            products,
        }
    }

    fn matches(product: &Product, query: &CatalogQuery) -> bool {
        if let Some(category) = &query.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(subcategory) = &query.subcategory {
            if !product.subcategory.eq_ignore_ascii_case(subcategory) {
                return false;
            }
        }
        if let Some(min_price) = query.min_price {
            if product.price < min_price {
                return false;
            }
        }
        if let Some(max_price) = query.max_price {
            if product.price > max_price {
                return false;
            }
        }
        if let Some(min_rating) = query.min_rating {
            if product.rating < min_rating {
                return false;
            }
        }
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_category = product.category.to_lowercase().contains(&needle);
            if !in_name && !in_category {
                return false;
            }
        }
        true
    }

    pub fn product_by_id(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category) {
                seen.push(product.category.clone());
            }
        }
        seen
    }

    /// Distinct subcategories, optionally restricted to one category.
    pub fn subcategories(&self, category: Option<&str>) -> Vec<String> {
        let mut seen = Vec::new();
        for product in &self.products {
            if let Some(category) = category {
                if !product.category.eq_ignore_ascii_case(category) {
                    continue;
                }
            }
            if !seen.contains(&product.subcategory) {
                seen.push(product.subcategory.clone());
            }
        }
        seen
    }
}

fn total_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl CatalogSource for Catalog {
    type Item = Product;

    async fn fetch_page(&self, query: &CatalogQuery) -> Result<Page<Product>, SourceError> {
        Ok(self.query(query))
    }
}

impl CatalogSource for &Catalog {
    type Item = Product;

    async fn fetch_page(&self, query: &CatalogQuery) -> Result<Page<Product>, SourceError> {
        Ok(self.query(query))
    }
}
