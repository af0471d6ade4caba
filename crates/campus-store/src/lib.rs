//! # campus-store
//!
//! Local state for the campus marketplace.
//!
//! Five collections (products, chats, the signed-in user, favorites and
//! purchase requests) are each kept in memory and mirrored as one JSON
//! document in a synchronous key-value medium.  The [`Marketplace`]
//! aggregate owns them and exposes every mutation.  Storage failures never
//! reach its callers: reads fall back to defaults and failed writes leave the
//! in-memory state authoritative.

pub mod backend;
pub mod backup;
pub mod collection;
pub mod database;
pub mod kv;
pub mod marketplace;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod seed;

mod error;

pub use backend::{MemoryBackend, SharedBackend, StorageBackend};
pub use backup::{MarketplaceSnapshot, RestoreStats};
pub use collection::{EntityStore, Favorites};
pub use database::Database;
pub use error::{Result, StoreError};
pub use kv::DurableValue;
pub use marketplace::Marketplace;
pub use models::*;
