//! Mock product catalog for the vitrine scroll loader.
//!
//! A fixed, generated inventory answering the paginated, filtered,
//! sorted queries defined by `vitrine-core`, both as a library type and
//! as an in-process [`CatalogSource`](vitrine_core::CatalogSource)
//! implementation. The HTTP façade lives in `vitrine-server`.

pub mod catalog;
pub mod product;

pub use catalog::{Catalog, STANDARD_INVENTORY};
pub use product::{generate_products, Product};
