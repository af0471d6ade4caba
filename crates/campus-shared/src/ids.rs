//! Id generation and timestamps.
//!
//! Ids have the shape `<prefix>_<suffix>` where the suffix is
//! [`ID_SUFFIX_LEN`] random base-36 characters.  Collisions are possible in
//! principle; at the scale of one local session they are ignored.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::constants::ID_SUFFIX_LEN;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh id with the given prefix, e.g. `p_k3x9a0q`.
pub fn uid(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let mut id = String::with_capacity(prefix.len() + 1 + ID_SUFFIX_LEN);
    id.push_str(prefix);
    id.push('_');
    for _ in 0..ID_SUFFIX_LEN {
        id.push(BASE36[rng.gen_range(0..BASE36.len())] as char);
    }
    id
}

/// Current wall-clock time in UTC.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
