//! Read-only lookups over the current marketplace snapshot.
//!
//! Everything here is a linear scan; collections are the size of one
//! campus's listings.

use crate::marketplace::Marketplace;
use crate::models::{Chat, Product, PurchaseRequest};

impl Marketplace {
    pub fn find_product(&self, product_id: &str) -> Option<&Product> {
        self.products().iter().find(|p| p.id == product_id)
    }

    pub fn find_chat(&self, chat_id: &str) -> Option<&Chat> {
        self.chats().iter().find(|c| c.id == chat_id)
    }

    pub fn find_purchase_request(&self, request_id: &str) -> Option<&PurchaseRequest> {
        self.purchase_requests().iter().find(|r| r.id == request_id)
    }

    /// Case-insensitive substring search over title, description and tags.
    /// A blank query matches everything.
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products().iter().collect();
        }

        self.products()
            .iter()
            .filter(|p| p.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn products_by_seller(&self, seller_id: &str) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| p.seller_id == seller_id)
            .collect()
    }

    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.favorites().contains(product_id)
    }

    /// Favorited products in the order they were favorited.  Ids whose
    /// listing has since been removed are skipped.
    pub fn favorite_products(&self) -> Vec<&Product> {
        self.favorites()
            .iter()
            .filter_map(|id| self.find_product(id))
            .collect()
    }

    /// Chats the user takes part in, most recently opened first.
    pub fn chats_for_user(&self, user_id: &str) -> Vec<&Chat> {
        self.chats().iter().filter(|c| c.involves(user_id)).collect()
    }

    /// Requests addressed to a seller.
    pub fn incoming_requests(&self, seller_id: &str) -> Vec<&PurchaseRequest> {
        self.purchase_requests()
            .iter()
            .filter(|r| r.seller_id == seller_id)
            .collect()
    }

    /// Requests a buyer has sent.
    pub fn outgoing_requests(&self, buyer_id: &str) -> Vec<&PurchaseRequest> {
        self.purchase_requests()
            .iter()
            .filter(|r| r.buyer_id == buyer_id)
            .collect()
    }
}
