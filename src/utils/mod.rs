//! Shared utilities.

mod hash;

pub use hash::fingerprint_tokens;
