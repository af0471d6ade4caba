//! The marketplace aggregate.
//!
//! [`Marketplace`] owns the five entity stores and is the only thing that
//! mutates them.  It is built once per session and handed to every consumer
//! by reference.  Operations that touch more than one store take
//! `&mut self`, so the whole transition runs before any other operation can
//! observe either store.

use campus_shared::constants::{
    CHATS_KEY, CHAT_ID_PREFIX, DEFAULT_USER_NAME, FAVORITES_KEY, MESSAGE_ID_PREFIX,
    PRODUCTS_KEY, PRODUCT_ID_PREFIX, PURCHASE_REQUESTS_KEY, PURCHASE_REQUEST_ID_PREFIX,
    USER_ID_PREFIX, USER_KEY,
};
use campus_shared::ids::{now, uid};

use crate::backend::SharedBackend;
use crate::collection::{
    ChatStore, EntityStore, FavoriteStore, Favorites, ProductStore, PurchaseRequestStore,
    UserStore,
};
use crate::models::{
    Chat, Message, Product, ProductDraft, ProductStatus, PurchaseRequest, RequestStatus, User,
    UserPatch,
};

/// Marketplace state: products, chats, the current user, favorites and
/// purchase requests.
pub struct Marketplace {
    pub(crate) products: ProductStore,
    pub(crate) chats: ChatStore,
    pub(crate) user: UserStore,
    pub(crate) favorites: FavoriteStore,
    pub(crate) purchase_requests: PurchaseRequestStore,
}

impl Marketplace {
    /// Build an unhydrated marketplace over `backend`.  Every collection
    /// starts empty and nothing is persisted until [`hydrate`](Self::hydrate).
    pub fn new(backend: SharedBackend) -> Self {
        Self {
            products: EntityStore::new("products", backend.clone(), PRODUCTS_KEY, Vec::new()),
            chats: EntityStore::new("chats", backend.clone(), CHATS_KEY, Vec::new()),
            user: EntityStore::new("user", backend.clone(), USER_KEY, None),
            favorites: EntityStore::new(
                "favorites",
                backend.clone(),
                FAVORITES_KEY,
                Favorites::new(),
            ),
            purchase_requests: EntityStore::new(
                "purchase_requests",
                backend,
                PURCHASE_REQUESTS_KEY,
                Vec::new(),
            ),
        }
    }

    /// Build and immediately hydrate.
    pub fn open(backend: SharedBackend) -> Self {
        let mut marketplace = Self::new(backend);
        marketplace.hydrate();
        marketplace
    }

    /// Load every collection from storage.  Safe to call more than once.
    pub fn hydrate(&mut self) {
        self.products.hydrate();
        self.chats.hydrate();
        self.user.hydrate();
        self.favorites.hydrate();
        self.purchase_requests.hydrate();

        tracing::info!(
            products = self.products.read().len(),
            chats = self.chats.read().len(),
            signed_in = self.user.read().is_some(),
            favorites = self.favorites.read().len(),
            purchase_requests = self.purchase_requests.read().len(),
            "marketplace hydrated"
        );
    }

    /// `true` once all five collections have been loaded.
    pub fn is_hydrated(&self) -> bool {
        self.products.is_hydrated()
            && self.chats.is_hydrated()
            && self.user.is_hydrated()
            && self.favorites.is_hydrated()
            && self.purchase_requests.is_hydrated()
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Listings, most recently posted first.
    pub fn products(&self) -> &[Product] {
        self.products.read()
    }

    /// Chats, most recently opened first.
    pub fn chats(&self) -> &[Chat] {
        self.chats.read()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.read().as_ref()
    }

    pub fn favorites(&self) -> &Favorites {
        self.favorites.read()
    }

    /// Purchase requests, most recent first.
    pub fn purchase_requests(&self) -> &[PurchaseRequest] {
        self.purchase_requests.read()
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// List a new product.  The store assigns the id and posting time and
    /// always starts the listing as available.
    pub fn add_product(&mut self, draft: ProductDraft) -> Product {
        let product = Product {
            id: uid(PRODUCT_ID_PREFIX),
            title: draft.title,
            price: draft.price,
            description: draft.description,
            images: draft.images,
            condition: draft.condition,
            category: draft.category,
            tags: draft.tags,
            seller_id: draft.seller_id,
            posted_at: now(),
            status: ProductStatus::Available,
        };

        tracing::debug!(product_id = %product.id, seller_id = %product.seller_id, "adding product");

        let created = product.clone();
        self.products.modify(|products| products.insert(0, product));
        created
    }

    /// Set a product's status.  Returns `false` (and changes nothing) when
    /// no product has `product_id`.
    pub fn update_product_status(&mut self, product_id: &str, status: ProductStatus) -> bool {
        let Some(index) = self.products.read().iter().position(|p| p.id == product_id) else {
            tracing::debug!(product_id, "status update for unknown product ignored");
            return false;
        };

        tracing::debug!(product_id, ?status, "updating product status");
        self.products.modify(|products| products[index].status = status);
        true
    }

    /// Remove a listing.  Chats, favorites and requests that reference it
    /// are left alone.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        if !self.products.read().iter().any(|p| p.id == product_id) {
            return false;
        }

        tracing::debug!(product_id, "removing product");
        self.products.update(|products| {
            products
                .iter()
                .filter(|p| p.id != product_id)
                .cloned()
                .collect()
        });
        true
    }

    // ------------------------------------------------------------------
    // User
    // ------------------------------------------------------------------

    /// Merge `patch` into the current user, creating a default user first
    /// when nobody is signed in.  Returns the resulting user.
    pub fn update_user(&mut self, patch: UserPatch) -> User {
        self.user.modify(|current| {
            let user = current.get_or_insert_with(|| User {
                id: uid(USER_ID_PREFIX),
                name: DEFAULT_USER_NAME.to_string(),
                email: None,
                avatar: None,
                is_admin: None,
            });
            user.apply(patch);

            tracing::debug!(user_id = %user.id, "user updated");
            user.clone()
        })
    }

    /// Replace the current user outright; `None` signs out.
    pub fn set_user(&mut self, user: Option<User>) {
        tracing::debug!(signed_in = user.is_some(), "user replaced");
        self.user.replace(user);
    }

    // ------------------------------------------------------------------
    // Chats
    // ------------------------------------------------------------------

    /// Return the chat for `product_id` between `participants`, creating it
    /// if none exists.
    ///
    /// Participants are compared as an ordered pair: `[a, b]` and `[b, a]`
    /// are different chats.
    pub fn add_chat_if_missing(&mut self, product_id: &str, participants: [&str; 2]) -> Chat {
        if let Some(existing) = self
            .chats
            .read()
            .iter()
            .find(|c| c.product_id == product_id && c.participants == participants)
        {
            return existing.clone();
        }

        let chat = Chat {
            id: uid(CHAT_ID_PREFIX),
            product_id: product_id.to_string(),
            participants: participants.map(str::to_string),
            messages: Vec::new(),
        };

        tracing::debug!(chat_id = %chat.id, product_id, "opening chat");

        let created = chat.clone();
        self.chats.modify(|chats| chats.insert(0, chat));
        created
    }

    /// Append a message to a chat.  Returns `None` (and changes nothing)
    /// when the chat does not exist.
    pub fn push_message(&mut self, chat_id: &str, from: &str, text: &str) -> Option<Message> {
        let Some(index) = self.chats.read().iter().position(|c| c.id == chat_id) else {
            tracing::debug!(chat_id, "message for unknown chat ignored");
            return None;
        };

        let message = Message {
            id: uid(MESSAGE_ID_PREFIX),
            from: from.to_string(),
            text: text.to_string(),
            at: now(),
        };

        tracing::debug!(chat_id, message_id = %message.id, "appending message");

        let appended = message.clone();
        self.chats.modify(|chats| chats[index].messages.push(message));
        Some(appended)
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Flip whether `product_id` is a favorite.  Returns the new membership.
    pub fn toggle_favorite(&mut self, product_id: &str) -> bool {
        let favorited = self.favorites.modify(|favs| favs.toggle(product_id));
        tracing::debug!(product_id, favorited, "favorite toggled");
        favorited
    }

    // ------------------------------------------------------------------
    // Purchase requests
    // ------------------------------------------------------------------

    /// Record a pending request from `buyer_id` for `product_id`.
    pub fn create_purchase_request(
        &mut self,
        product_id: &str,
        buyer_id: &str,
        seller_id: &str,
    ) -> PurchaseRequest {
        let request = PurchaseRequest {
            id: uid(PURCHASE_REQUEST_ID_PREFIX),
            product_id: product_id.to_string(),
            buyer_id: buyer_id.to_string(),
            seller_id: seller_id.to_string(),
            status: RequestStatus::Pending,
            created_at: now(),
        };

        tracing::debug!(request_id = %request.id, product_id, buyer_id, "purchase request created");

        let created = request.clone();
        self.purchase_requests
            .modify(|requests| requests.insert(0, request));
        created
    }

    /// Set a request's status.  Accepting a request also marks its product
    /// sold, in the same step.  Returns the updated request, or `None` when
    /// no request has `request_id`.
    pub fn update_purchase_request(
        &mut self,
        request_id: &str,
        status: RequestStatus,
    ) -> Option<PurchaseRequest> {
        let index = self
            .purchase_requests
            .read()
            .iter()
            .position(|r| r.id == request_id);
        let Some(index) = index else {
            tracing::debug!(request_id, "update for unknown purchase request ignored");
            return None;
        };

        let updated = self.purchase_requests.modify(|requests| {
            requests[index].status = status;
            requests[index].clone()
        });

        tracing::debug!(request_id, ?status, product_id = %updated.product_id, "purchase request updated");

        if status == RequestStatus::Accepted {
            self.update_product_status(&updated.product_id, ProductStatus::Sold);
        }

        Some(updated)
    }
}
