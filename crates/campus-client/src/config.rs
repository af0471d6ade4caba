//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration.

use std::path::PathBuf;

use campus_shared::constants::DEFAULT_ADMIN_EMAIL;

/// Which medium backs the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// SQLite file in the data directory; survives restarts.
    Sqlite,
    /// Process memory; gone when the client exits.
    Memory,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Storage medium.
    /// Env: `CAMPUS_STORAGE` (`sqlite` / `memory`)
    /// Default: `sqlite`
    pub storage: StorageKind,

    /// Directory holding the database file.
    /// Env: `CAMPUS_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Whether an empty catalogue is filled with sample listings at startup.
    /// Env: `CAMPUS_SEED_SAMPLES` (true/false)
    /// Default: `true`
    pub seed_samples: bool,

    /// Email that may take the admin sign-in path.
    /// Env: `CAMPUS_ADMIN_EMAIL`
    /// Default: `admin@gmail.com`
    pub admin_email: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::Sqlite,
            data_dir: None,
            seed_samples: true,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(kind) = var("CAMPUS_STORAGE") {
            match kind.trim().to_ascii_lowercase().as_str() {
                "sqlite" => config.storage = StorageKind::Sqlite,
                "memory" => config.storage = StorageKind::Memory,
                _ => {
                    tracing::warn!(value = %kind, "Invalid CAMPUS_STORAGE, using default");
                }
            }
        }

        if let Some(dir) = var("CAMPUS_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(val) = var("CAMPUS_SEED_SAMPLES") {
            config.seed_samples = val != "false" && val != "0";
        }

        if let Some(email) = var("CAMPUS_ADMIN_EMAIL") {
            let email = email.trim();
            if email.contains('@') {
                config.admin_email = email.to_string();
            } else {
                tracing::warn!(value = %email, "Invalid CAMPUS_ADMIN_EMAIL, using default");
            }
        }

        config
    }

    /// In-memory storage, no sample data.  Handy for tests.
    pub fn ephemeral() -> Self {
        Self {
            storage: StorageKind::Memory,
            seed_samples: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.storage, StorageKind::Sqlite);
        assert!(config.data_dir.is_none());
        assert!(config.seed_samples);
        assert_eq!(config.admin_email, "admin@gmail.com");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_vars(vars(&[
            ("CAMPUS_STORAGE", "Memory"),
            ("CAMPUS_DATA_DIR", "/tmp/campus"),
            ("CAMPUS_SEED_SAMPLES", "0"),
            ("CAMPUS_ADMIN_EMAIL", "dean@college.edu"),
        ]));
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/campus")));
        assert!(!config.seed_samples);
        assert_eq!(config.admin_email, "dean@college.edu");
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ClientConfig::from_vars(vars(&[
            ("CAMPUS_STORAGE", "floppy"),
            ("CAMPUS_ADMIN_EMAIL", "nobody"),
        ]));
        assert_eq!(config.storage, StorageKind::Sqlite);
        assert_eq!(config.admin_email, "admin@gmail.com");
    }
}
