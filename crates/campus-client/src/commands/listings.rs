use campus_shared::constants::SAMPLE_SELLER_ID;
use campus_store::{Product, ProductDraft, ProductStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{lock, require_user_id};
use crate::state::{AppState, SharedState};

/// Listing form submitted by the signed-in seller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub condition: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// A product as the catalogue shows it to the current user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub is_favorite: bool,
    pub is_own: bool,
}

fn view(guard: &AppState, product: &Product) -> ProductView {
    let user_id = guard.marketplace.user().map(|u| u.id.as_str());
    ProductView {
        product: product.clone(),
        is_favorite: guard.marketplace.is_favorite(&product.id),
        is_own: user_id == Some(product.seller_id.as_str()),
    }
}

/// Search the catalogue.  An empty query lists everything.
pub fn list_products(state: &SharedState, query: &str) -> Result<Vec<ProductView>, String> {
    let guard = lock(state)?;
    Ok(guard
        .marketplace
        .search_products(query)
        .into_iter()
        .map(|p| view(&guard, p))
        .collect())
}

pub fn get_product(state: &SharedState, product_id: &str) -> Result<ProductView, String> {
    let guard = lock(state)?;
    let product = guard
        .marketplace
        .find_product(product_id)
        .ok_or_else(|| "Product not found".to_string())?;
    Ok(view(&guard, product))
}

/// Publish a listing sold by the signed-in user.
pub fn create_listing(state: &SharedState, listing: NewListing) -> Result<Product, String> {
    if listing.title.trim().is_empty() {
        return Err("Title is required".into());
    }
    if !listing.price.is_finite() || listing.price < 0.0 {
        return Err("Price must be a non-negative number".into());
    }

    let mut guard = lock(state)?;
    let seller_id = require_user_id(&guard)?;

    let product = guard.marketplace.add_product(ProductDraft {
        title: listing.title.trim().to_string(),
        price: listing.price,
        description: listing.description,
        images: listing.images,
        condition: listing.condition,
        category: listing.category,
        tags: listing.tags,
        seller_id,
    });

    info!(product_id = %product.id, "Listing published");
    Ok(product)
}

/// Take a listing down.  Allowed for its seller and for admins.
pub fn remove_listing(state: &SharedState, product_id: &str) -> Result<(), String> {
    let mut guard = lock(state)?;

    let user = guard
        .marketplace
        .user()
        .cloned()
        .ok_or_else(|| "Not signed in".to_string())?;
    let product = guard
        .marketplace
        .find_product(product_id)
        .ok_or_else(|| "Product not found".to_string())?;

    if product.seller_id != user.id && !user.is_admin() {
        return Err("Only the seller or an admin can remove this listing".into());
    }

    guard.marketplace.remove_product(product_id);
    info!(product_id, removed_by = %user.id, "Listing removed");
    Ok(())
}

pub fn mark_product_status(
    state: &SharedState,
    product_id: &str,
    status: ProductStatus,
) -> Result<(), String> {
    let mut guard = lock(state)?;
    if !guard.marketplace.update_product_status(product_id, status) {
        return Err("Product not found".into());
    }
    Ok(())
}

/// Descriptions shorter than this get the pickup note appended.
const SHORT_DESCRIPTION_LEN: usize = 40;
const PICKUP_NOTE: &str = " Great condition, available for pickup at campus.";

/// Tidy a listing description into one capitalised sentence-ending line.
/// Short results get the pickup note; blank input stays empty.
pub fn refine_description(text: &str) -> String {
    let mut collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return collapsed;
    }
    if !collapsed.ends_with(&['.', '!', '?'][..]) {
        collapsed.push('.');
    }

    let mut chars = collapsed.chars();
    let mut refined: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if refined.chars().count() < SHORT_DESCRIPTION_LEN {
        refined.push_str(PICKUP_NOTE);
    }
    refined
}

/// Suggest a cleaned-up description for the listing form.
pub fn refine_listing_description(text: &str) -> Result<String, String> {
    let refined = refine_description(text);
    debug!(before = text.len(), after = refined.len(), "Description refined");
    Ok(refined)
}

/// Fill an empty catalogue with the sample listings.  Returns how many were
/// added.
pub fn seed_samples(state: &SharedState) -> Result<usize, String> {
    let mut guard = lock(state)?;
    Ok(guard
        .marketplace
        .seed_sample_products(SAMPLE_SELLER_ID)
        .len())
}
