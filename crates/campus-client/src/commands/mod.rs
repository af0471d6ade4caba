//! Command functions invoked by the UI layer.
//!
//! Every command takes the [`SharedState`] handle, holds the lock for the
//! duration of one marketplace operation and reports failures as strings
//! suitable for display.

pub mod auth;
pub mod chat;
pub mod favorites;
pub mod listings;
pub mod requests;
pub mod settings;

use std::sync::MutexGuard;

use crate::state::{AppState, SharedState};

pub(crate) fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>, String> {
    state.lock().map_err(|e| format!("Lock poisoned: {e}"))
}

/// Id of the signed-in user, or an error for commands that need one.
pub(crate) fn require_user_id(guard: &AppState) -> Result<String, String> {
    guard
        .marketplace
        .user()
        .map(|u| u.id.clone())
        .ok_or_else(|| "Not signed in".to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use campus_store::{Product, ProductDraft};

    use crate::config::ClientConfig;
    use crate::state::SharedState;

    pub fn session() -> SharedState {
        crate::bootstrap(ClientConfig::ephemeral()).unwrap()
    }

    /// Put a listing from another seller into the catalogue.
    pub fn foreign_listing(state: &SharedState, seller_id: &str) -> Product {
        state.lock().unwrap().marketplace.add_product(ProductDraft {
            title: "Graphing Calculator".into(),
            price: 900.0,
            seller_id: seller_id.into(),
            ..Default::default()
        })
    }
}
