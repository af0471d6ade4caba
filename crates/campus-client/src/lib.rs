//! # campus-client
//!
//! Session wiring for the campus marketplace: configuration, logging, the
//! shared [`AppState`](state::AppState) and the command functions a UI layer
//! calls.  Commands report failures as human-readable strings.

pub mod commands;
pub mod config;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use campus_shared::constants::{APP_NAME, SAMPLE_SELLER_ID};
use campus_store::{Database, MemoryBackend, SharedBackend};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{ClientConfig, StorageKind};
use crate::state::{AppState, SharedState};

/// Install the global tracing subscriber.  Respects `RUST_LOG`; does nothing
/// if a subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("campus_client=debug,campus_store=info,warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Open the storage medium selected by `config`.
pub fn open_backend(config: &ClientConfig) -> anyhow::Result<SharedBackend> {
    let backend: SharedBackend = match config.storage {
        StorageKind::Memory => Arc::new(MemoryBackend::new()),
        StorageKind::Sqlite => {
            let db = match &config.data_dir {
                Some(dir) => Database::open_in_dir(dir)
                    .with_context(|| format!("opening database in {}", dir.display()))?,
                None => Database::new().context("opening default database")?,
            };
            Arc::new(db)
        }
    };
    Ok(backend)
}

/// Build the session: open storage, hydrate every store and, if configured,
/// seed an empty catalogue.
pub fn bootstrap(config: ClientConfig) -> anyhow::Result<SharedState> {
    tracing::info!(app = APP_NAME, storage = ?config.storage, "Starting client session");

    let backend = open_backend(&config)?;
    let mut state = AppState::open(backend, config);

    if state.config.seed_samples {
        state.marketplace.seed_sample_products(SAMPLE_SELLER_ID);
    }

    Ok(state.into_shared())
}
