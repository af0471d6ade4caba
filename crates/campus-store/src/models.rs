//! Domain model structs persisted as JSON documents.
//!
//! Field names serialize in camelCase (`sellerId`, `postedAt`, ...) and enum
//! values as lowercase strings, which is the layout stored under each key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// Lifecycle of a listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Available,
    Requested,
    Sold,
}

/// A listing in the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub description: String,
    /// Image URIs, cover image first.
    pub images: Vec<String>,
    pub condition: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Id of the listing user.  Not checked against any user record.
    pub seller_id: String,
    pub posted_at: DateTime<Utc>,
    pub status: ProductStatus,
}

/// Caller-supplied fields of a new listing.  Id, timestamp and status are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub condition: String,
    pub category: String,
    pub tags: Vec<String>,
    pub seller_id: String,
}

impl Product {
    /// Text matched by catalogue search: title, description and tags.
    pub fn search_text(&self) -> String {
        let mut text = format!("{} {}", self.title, self.description);
        if !self.tags.is_empty() {
            text.push(' ');
            text.push_str(&self.tags.join(" "));
        }
        text
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The signed-in local user.  Only one is ever tracked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }

    /// Overwrite every field present in `patch`.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(is_admin) = patch.is_admin {
            self.is_admin = Some(is_admin);
        }
    }
}

/// Partial user update; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub is_admin: Option<bool>,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// A conversation about one product between exactly two users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub product_id: String,
    /// Ordered pair, usually `[buyer, seller]`.  Order is significant for
    /// de-duplication.
    pub participants: [String; 2],
    /// Oldest first.
    pub messages: Vec<Message>,
}

impl Chat {
    pub fn involves(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// A single chat message.  Never edited after it is appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub from: String,
    pub text: String,
    pub at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Purchase request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

/// A buyer's request to purchase a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub id: String,
    pub product_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_serializes_in_camel_case() {
        let product = Product {
            id: "p_1".into(),
            title: "Book".into(),
            price: 150.0,
            description: "Calculus".into(),
            images: vec![],
            condition: "Good".into(),
            category: "Books".into(),
            tags: vec!["campus".into()],
            seller_id: "u_1".into(),
            posted_at: Utc::now(),
            status: ProductStatus::Sold,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["sellerId"], "u_1");
        assert_eq!(json["status"], "sold");
        assert!(json["postedAt"].is_string());
    }

    #[test]
    fn user_optional_fields_are_omitted_and_defaulted() {
        let user: User = serde_json::from_str(r#"{"id":"u_1","name":"You"}"#).unwrap();
        assert_eq!(user.email, None);
        assert!(!user.is_admin());

        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"id":"u_1","name":"You"}"#);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut user = User {
            id: "u_1".into(),
            name: "You".into(),
            email: Some("old@example.com".into()),
            avatar: None,
            is_admin: None,
        };
        user.apply(UserPatch {
            name: Some("Asha".into()),
            is_admin: Some(true),
            ..Default::default()
        });

        assert_eq!(user.id, "u_1");
        assert_eq!(user.name, "Asha");
        assert_eq!(user.email.as_deref(), Some("old@example.com"));
        assert!(user.is_admin());
    }

    #[test]
    fn chat_rejects_wrong_participant_count() {
        let json = r#"{"id":"c_1","productId":"p_1","participants":["a"],"messages":[]}"#;
        assert!(serde_json::from_str::<Chat>(json).is_err());
    }

    #[test]
    fn search_text_joins_tags() {
        let draft = ProductDraft {
            title: "Kit".into(),
            description: "Tools".into(),
            tags: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        let product = Product {
            id: "p".into(),
            title: draft.title,
            price: 0.0,
            description: draft.description,
            images: vec![],
            condition: String::new(),
            category: String::new(),
            tags: draft.tags,
            seller_id: String::new(),
            posted_at: Utc::now(),
            status: ProductStatus::Available,
        };
        assert_eq!(product.search_text(), "Kit Tools a b");
    }
}
