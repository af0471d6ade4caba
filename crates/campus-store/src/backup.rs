use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::Favorites;
use crate::error::Result;
use crate::marketplace::Marketplace;
use crate::models::{Chat, Product, PurchaseRequest, User};

/// Every collection of a marketplace at one instant, as a single JSON
/// document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceSnapshot {
    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,
    /// Crate version that produced the snapshot
    pub version: String,
    pub products: Vec<Product>,
    pub chats: Vec<Chat>,
    pub user: Option<User>,
    pub favorites: Favorites,
    pub purchase_requests: Vec<PurchaseRequest>,
}

impl Marketplace {
    /// Copy every collection into a snapshot.
    pub fn snapshot(&self) -> MarketplaceSnapshot {
        MarketplaceSnapshot {
            created_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            products: self.products().to_vec(),
            chats: self.chats().to_vec(),
            user: self.user().cloned(),
            favorites: self.favorites().clone(),
            purchase_requests: self.purchase_requests().to_vec(),
        }
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Replace every collection with the snapshot's contents and persist
    /// them.  Nothing is merged.
    pub fn restore(&mut self, snapshot: MarketplaceSnapshot) -> RestoreStats {
        let stats = RestoreStats {
            products: snapshot.products.len(),
            chats: snapshot.chats.len(),
            messages: snapshot.chats.iter().map(|c| c.messages.len()).sum(),
            favorites: snapshot.favorites.len(),
            purchase_requests: snapshot.purchase_requests.len(),
            user_restored: snapshot.user.is_some(),
        };

        tracing::info!(
            version = %snapshot.version,
            created_at = %snapshot.created_at,
            ?stats,
            "restoring marketplace snapshot"
        );

        self.products.replace(snapshot.products);
        self.chats.replace(snapshot.chats);
        self.user.replace(snapshot.user);
        self.favorites.replace(snapshot.favorites);
        self.purchase_requests.replace(snapshot.purchase_requests);

        stats
    }

    /// Parse a snapshot produced by [`export_json`](Self::export_json) and
    /// restore it.  A malformed document changes nothing.
    pub fn import_json(&mut self, json: &str) -> Result<RestoreStats> {
        let snapshot: MarketplaceSnapshot = serde_json::from_str(json)?;
        Ok(self.restore(snapshot))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreStats {
    pub products: usize,
    pub chats: usize,
    pub messages: usize,
    pub favorites: usize,
    pub purchase_requests: usize,
    pub user_restored: bool,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::StoreError;
    use crate::models::{ProductDraft, UserPatch};

    #[test]
    fn export_then_import_into_fresh_marketplace() {
        let mut source = Marketplace::open(Arc::new(MemoryBackend::new()));
        let user = source.update_user(UserPatch::default());
        let product = source.add_product(ProductDraft {
            title: "Book".into(),
            price: 150.0,
            seller_id: "seller1".into(),
            ..Default::default()
        });
        let chat = source.add_chat_if_missing(&product.id, [user.id.as_str(), "seller1"]);
        source.push_message(&chat.id, &user.id, "Hi");
        source.toggle_favorite(&product.id);
        source.create_purchase_request(&product.id, &user.id, "seller1");

        let json = source.export_json().unwrap();

        let mut target = Marketplace::open(Arc::new(MemoryBackend::new()));
        target.add_product(ProductDraft::default());
        let stats = target.import_json(&json).unwrap();

        assert_eq!(
            stats,
            RestoreStats {
                products: 1,
                chats: 1,
                messages: 1,
                favorites: 1,
                purchase_requests: 1,
                user_restored: true,
            }
        );
        assert_eq!(target.products(), source.products());
        assert_eq!(target.chats(), source.chats());
        assert_eq!(target.user(), source.user());
        assert_eq!(target.favorites(), source.favorites());
        assert_eq!(target.purchase_requests(), source.purchase_requests());
    }

    #[test]
    fn malformed_import_changes_nothing() {
        let mut m = Marketplace::open(Arc::new(MemoryBackend::new()));
        m.add_product(ProductDraft::default());

        let err = m.import_json("{\"products\": 3}").unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
        assert_eq!(m.products().len(), 1);
    }
}
