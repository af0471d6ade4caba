//! # campus-shared
//!
//! Constants and small helpers shared by the store and the client: the
//! persisted key layout, id generation and the wall clock.

pub mod constants;
pub mod ids;
