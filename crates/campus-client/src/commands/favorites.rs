use campus_store::Product;

use super::lock;
use crate::state::SharedState;

/// Flip a product in or out of the favorites.  Returns the new state.
pub fn toggle_favorite(state: &SharedState, product_id: &str) -> Result<bool, String> {
    let mut guard = lock(state)?;
    Ok(guard.marketplace.toggle_favorite(product_id))
}

/// Favorited products still in the catalogue, oldest favorite first.
pub fn list_favorites(state: &SharedState) -> Result<Vec<Product>, String> {
    let guard = lock(state)?;
    Ok(guard
        .marketplace
        .favorite_products()
        .into_iter()
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{foreign_listing, session};

    #[test]
    fn toggle_twice_round_trips() {
        let state = session();
        let product = foreign_listing(&state, "seller_1");

        assert!(toggle_favorite(&state, &product.id).unwrap());
        assert_eq!(list_favorites(&state).unwrap(), vec![product.clone()]);

        assert!(!toggle_favorite(&state, &product.id).unwrap());
        assert!(list_favorites(&state).unwrap().is_empty());
    }
}
