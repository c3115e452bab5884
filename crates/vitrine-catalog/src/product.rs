//! Product record and seeded inventory generation

use chrono::{DateTime, Duration, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One catalog product. The loader core never looks past the id; the
/// fields exist for filtering, sorting and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub subcategory: String,
    pub stock: u32,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

pub(crate) const CATEGORIES: [&str; 10] = [
    "Electronics",
    "Clothing",
    "Home & Kitchen",
    "Books",
    "Toys",
    "Sports",
    "Beauty",
    "Health",
    "Automotive",
    "Grocery",
];

const ADJECTIVES: [&str; 16] = [
    "Premium",
    "Deluxe",
    "Ultimate",
    "Essential",
    "Professional",
    "Classic",
    "Modern",
    "Elegant",
    "Luxury",
    "Budget",
    "Compact",
    "Portable",
    "Wireless",
    "Smart",
    "Eco-friendly",
    "Vintage",
];

const NOUNS: [&str; 13] = [
    "Device",
    "Tool",
    "Set",
    "Kit",
    "Pack",
    "Collection",
    "System",
    "Solution",
    "Bundle",
    "Package",
    "Box",
    "Accessory",
    "Component",
];

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Generate `count` products from a seeded generator.
///
/// Names, prices, categories, stock and ratings are reproducible for a
/// given seed; ids are fresh v4 UUIDs and timestamps are relative to
/// now, so only the queryable fields are deterministic.
pub fn generate_products(count: usize, seed: u64) -> Vec<Product> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let now = Utc::now();

    (1..=count)
        .map(|i| {
            let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
            let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
            Product {
                id: Uuid::new_v4(),
                name: format!("{adjective} {category} {noun} {i}"),
                price: round_to(rng.gen_range(10.0..510.0), 2),
                category: category.to_string(),
                subcategory: format!("{category} {}", rng.gen_range(1..=5)),
                stock: rng.gen_range(0..100),
                rating: round_to(rng.gen_range(1.0..5.0), 1),
                created_at: now - Duration::seconds(rng.gen_range(0..90 * 24 * 3600)),
            }
        })
        .collect()
}
