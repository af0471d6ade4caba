//! Sample catalogue shown to a brand-new session.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::marketplace::Marketplace;
use crate::models::{Product, ProductDraft};

const SAMPLE_TITLES: [&str; 6] = [
    "Calculus Book",
    "Mechanical Kit",
    "Laptop Sleeve",
    "Graphing Calculator",
    "USB Microphone",
    "Data Structures Book",
];

const SAMPLE_PRICES: [f64; 6] = [150.0, 450.0, 299.0, 900.0, 1200.0, 200.0];

const SAMPLE_CATEGORIES: [&str; 3] = ["Books", "Electronics", "Accessories"];

const PLACEHOLDER_COLORS: [&str; 6] = [
    "#334155", "#0f172a", "#1e293b", "#062344", "#123456", "#0b3a3a",
];

/// An 800x600 SVG placeholder image as a `data:` URI.
pub fn placeholder_image(index: usize) -> String {
    let color = PLACEHOLDER_COLORS[index % PLACEHOLDER_COLORS.len()];
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='800' height='600'>\
         <rect width='100%' height='100%' fill='{color}'/>\
         <text x='50%' y='50%' dominant-baseline='middle' text-anchor='middle' \
         font-size='28' fill='white'>Sample Image {}</text></svg>",
        index + 1
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// The six sample listings, all sold by `seller_id`.
pub fn sample_drafts(seller_id: &str) -> Vec<ProductDraft> {
    (0..SAMPLE_TITLES.len())
        .map(|i| ProductDraft {
            title: SAMPLE_TITLES[i].to_string(),
            price: SAMPLE_PRICES[i],
            description: "A well-maintained item perfect for students.".to_string(),
            images: vec![placeholder_image(i)],
            condition: if i % 2 == 0 { "Like New" } else { "Good" }.to_string(),
            category: SAMPLE_CATEGORIES[i % SAMPLE_CATEGORIES.len()].to_string(),
            tags: vec!["campus".to_string(), "student".to_string()],
            seller_id: seller_id.to_string(),
        })
        .collect()
}

impl Marketplace {
    /// Fill an empty catalogue with the sample listings.  Does nothing (and
    /// returns an empty list) when any product exists.
    ///
    /// The listings end up in sample order, first sample first.
    pub fn seed_sample_products(&mut self, seller_id: &str) -> Vec<Product> {
        if !self.products().is_empty() {
            return Vec::new();
        }

        tracing::info!(seller_id, count = SAMPLE_TITLES.len(), "seeding sample catalogue");

        let mut created: Vec<Product> = sample_drafts(seller_id)
            .into_iter()
            .rev()
            .map(|draft| self.add_product(draft))
            .collect();
        created.reverse();
        created
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::MemoryBackend;
    use crate::models::ProductStatus;

    #[test]
    fn placeholder_is_a_data_uri() {
        let uri = placeholder_image(7);
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
        let encoded = uri.trim_start_matches("data:image/svg+xml;base64,");
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains("#0f172a"));
        assert!(svg.contains("Sample Image 8"));
    }

    #[test]
    fn seeds_only_an_empty_catalogue() {
        let mut m = Marketplace::open(Arc::new(MemoryBackend::new()));

        let seeded = m.seed_sample_products("seller_1");
        assert_eq!(seeded.len(), 6);
        assert_eq!(m.products()[0].title, "Calculus Book");
        assert_eq!(m.products()[5].title, "Data Structures Book");
        assert_eq!(m.products()[1].condition, "Good");
        assert_eq!(m.products()[2].category, "Accessories");
        assert!(m
            .products()
            .iter()
            .all(|p| p.status == ProductStatus::Available && p.seller_id == "seller_1"));

        assert!(m.seed_sample_products("seller_1").is_empty());
        assert_eq!(m.products().len(), 6);
    }
}
