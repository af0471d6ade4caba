//! Application state shared across all commands.
//!
//! The [`AppState`] struct is built once by [`crate::bootstrap`], wrapped in
//! `Arc<Mutex<>>` and passed to every command, so there is exactly one
//! marketplace per session and no ambient global.

use std::sync::{Arc, Mutex};

use campus_shared::constants::THEME_KEY;
use campus_store::{DurableValue, Marketplace, SharedBackend};

use crate::commands::auth::AdminOtpChallenge;
use crate::commands::settings::{self, Theme};
use crate::config::ClientConfig;

/// Handle given to every command.
pub type SharedState = Arc<Mutex<AppState>>;

/// Central application state.
pub struct AppState {
    /// Products, chats, user, favorites and purchase requests.
    pub marketplace: Marketplace,

    /// Persisted UI theme.
    pub theme: DurableValue<Theme>,

    /// Admin sign-in waiting for its (unchecked) one-time code.
    pub pending_admin_otp: Option<AdminOtpChallenge>,

    /// Configuration the session was started with.
    pub config: ClientConfig,
}

impl AppState {
    /// Create the state over `backend` and load everything it holds.
    pub fn open(backend: SharedBackend, config: ClientConfig) -> Self {
        let marketplace = Marketplace::open(backend.clone());

        settings::upgrade_bare_theme(&*backend);
        let mut theme = DurableValue::new(backend, THEME_KEY, Theme::default());
        theme.hydrate();

        Self {
            marketplace,
            theme,
            pending_admin_otp: None,
            config,
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }
}
