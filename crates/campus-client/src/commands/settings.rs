use campus_shared::constants::THEME_KEY;
use campus_store::StorageBackend;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::lock;
use crate::state::SharedState;

/// UI colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// A theme saved as a bare word (`dark`) is rewritten as a JSON string so it
/// loads instead of reading as corrupt.
pub(crate) fn upgrade_bare_theme(backend: &dyn StorageBackend) {
    let raw = match backend.get_item(THEME_KEY) {
        Ok(Some(raw)) => raw,
        _ => return,
    };
    let word = raw.trim();
    if word != "dark" && word != "light" {
        return;
    }

    if let Err(e) = backend.set_item(THEME_KEY, &format!("\"{word}\"")) {
        warn!(error = %e, "Failed to upgrade stored theme");
    }
}

pub fn get_theme(state: &SharedState) -> Result<Theme, String> {
    let guard = lock(state)?;
    Ok(*guard.theme.get())
}

pub fn set_theme(state: &SharedState, theme: Theme) -> Result<(), String> {
    let mut guard = lock(state)?;
    guard.theme.set(theme);
    info!(?theme, "Theme updated");
    Ok(())
}

/// Switch between dark and light.  Returns the new theme.
pub fn toggle_theme(state: &SharedState) -> Result<Theme, String> {
    let mut guard = lock(state)?;
    let next = guard.theme.get().toggled();
    guard.theme.set(next);
    info!(theme = ?next, "Theme toggled");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::session;
    use std::sync::Arc;

    use campus_store::MemoryBackend;

    use crate::config::ClientConfig;
    use crate::state::AppState;

    #[test]
    fn defaults_to_dark_and_toggles() {
        let state = session();
        assert_eq!(get_theme(&state).unwrap(), Theme::Dark);
        assert_eq!(toggle_theme(&state).unwrap(), Theme::Light);
        assert_eq!(toggle_theme(&state).unwrap(), Theme::Dark);
    }

    #[test]
    fn theme_persists_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            data_dir: Some(dir.path().to_path_buf()),
            seed_samples: false,
            ..ClientConfig::default()
        };

        {
            let state = crate::bootstrap(config.clone()).unwrap();
            set_theme(&state, Theme::Light).unwrap();
        }

        let state = crate::bootstrap(config).unwrap();
        assert_eq!(get_theme(&state).unwrap(), Theme::Light);
    }

    #[test]
    fn theme_is_stored_as_plain_string() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }

    #[test]
    fn bare_theme_word_is_loaded() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_item(THEME_KEY, "light").unwrap();

        let state = AppState::open(backend.clone(), ClientConfig::ephemeral());
        assert_eq!(*state.theme.get(), Theme::Light);
        assert_eq!(
            backend.get_item(THEME_KEY).unwrap().as_deref(),
            Some("\"light\"")
        );
    }

    #[test]
    fn unknown_theme_value_falls_back_to_dark() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_item(THEME_KEY, "sepia").unwrap();

        let state = AppState::open(backend, ClientConfig::ephemeral());
        assert_eq!(*state.theme.get(), Theme::Dark);
    }
}
