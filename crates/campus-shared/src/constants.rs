/// Application name
pub const APP_NAME: &str = "College Marketplace";

/// Persisted key holding the product catalogue
pub const PRODUCTS_KEY: &str = "products-store";

/// Persisted key holding every chat thread
pub const CHATS_KEY: &str = "chats-store";

/// Persisted key holding the signed-in user (or `null`)
pub const USER_KEY: &str = "user-store";

/// Persisted key holding favorited product ids
pub const FAVORITES_KEY: &str = "favorites-store";

/// Persisted key holding purchase requests
pub const PURCHASE_REQUESTS_KEY: &str = "purchase-requests-store";

/// Persisted key holding the UI theme preference
pub const THEME_KEY: &str = "theme";

/// Id prefixes, one per entity kind
pub const PRODUCT_ID_PREFIX: &str = "p";
pub const USER_ID_PREFIX: &str = "u";
pub const CHAT_ID_PREFIX: &str = "c";
pub const MESSAGE_ID_PREFIX: &str = "m";
pub const PURCHASE_REQUEST_ID_PREFIX: &str = "pr";

/// Number of random base-36 characters after the id prefix
pub const ID_SUFFIX_LEN: usize = 7;

/// Display name given to a user created implicitly by a profile update
pub const DEFAULT_USER_NAME: &str = "You";

/// Participant id used when a chat is opened without a signed-in user
pub const GUEST_USER_ID: &str = "guest";

/// Email that unlocks the admin sign-in path
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@gmail.com";

/// Avatar assigned to fabricated identities
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/150";

/// Seller id attached to the sample catalogue
pub const SAMPLE_SELLER_ID: &str = "seller_1";
