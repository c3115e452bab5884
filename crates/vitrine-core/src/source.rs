//! Catalog service seam: query/page wire types and the fetch trait

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Property a catalog query sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Rating,
    Stock,
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

fn default_limit() -> usize {
    10
}

/// Parameters of one paginated catalog query.
///
/// The loader core only ever sets `limit`, `offset` and `search`; the
/// remaining filter/sort fields are passed through to the service
/// unchanged. Field names match the catalog's JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
            search: None,
            category: None,
            subcategory: None,
            min_price: None,
            max_price: None,
            min_rating: None,
            sort: SortKey::default(),
            order: SortOrder::default(),
        }
    }
}

impl CatalogQuery {
    /// Copy of this query aimed at one page.
    pub fn page(&self, offset: usize, limit: usize) -> Self {
        Self {
            limit,
            offset,
            ..self.clone()
        }
    }
}

/// One page of a paginated catalog response.
///
/// `total` is the service's filtered count; the loader core does not
/// trust it for extent bookkeeping — a page shorter than its limit is
/// the sole end-of-data signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub products: Vec<T>,
}

impl<T> Page<T> {
    /// Whether this page proves no further items exist past it.
    pub fn is_final(&self) -> bool {
        self.products.len() < self.limit
    }
}

/// Failure of one catalog fetch.
///
/// The coordinator treats every variant the same way as an empty page:
/// the failing direction closes until the next reset. Nothing here is
/// ever surfaced to the rendering side.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {message}")]
    Network { message: String },
    #[error("catalog returned status {code}")]
    Status { code: u16 },
    #[error("malformed catalog response: {message}")]
    Decode { message: String },
}

/// A paginated, filtered, sorted view over a fixed collection.
///
/// Implementations must keep item ordering stable across repeated calls
/// with identical parameters; the store's index-addressed cache is only
/// correct under that assumption.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    type Item;

    /// Fetch one page. An offset past the end of the filtered collection
    /// yields an empty page, not an error.
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<Page<Self::Item>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_deserializes_from_camel_case_params() {
        let query: CatalogQuery = serde_json::from_str(
            r#"{"limit":40,"offset":80,"search":"deluxe","minPrice":10.5,"sort":"createdAt","order":"desc"}"#,
        )
        .unwrap();
        assert_eq!(query.limit, 40);
        assert_eq!(query.offset, 80);
        assert_eq!(query.search.as_deref(), Some("deluxe"));
        assert_eq!(query.min_price, Some(10.5));
        assert_eq!(query.sort, SortKey::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn query_defaults_match_the_service() {
        let query: CatalogQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
        assert_eq!(query.sort, SortKey::Name);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query, CatalogQuery::default());
    }

    #[test]
    fn page_builder_keeps_filters() {
        let base = CatalogQuery {
            search: Some("kit".into()),
            category: Some("Toys".into()),
            ..CatalogQuery::default()
        };
        let page = base.page(120, 40);
        assert_eq!(page.offset, 120);
        assert_eq!(page.limit, 40);
        assert_eq!(page.search.as_deref(), Some("kit"));
        assert_eq!(page.category.as_deref(), Some("Toys"));
    }

    #[test]
    fn short_page_is_final() {
        let page = Page {
            total: 65,
            limit: 40,
            offset: 40,
            products: vec![(); 25],
        };
        assert!(page.is_final());

        let full = Page {
            total: 100,
            limit: 40,
            offset: 0,
            products: vec![(); 40],
        };
        assert!(!full.is_final());
    }
}
