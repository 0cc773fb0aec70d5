//! Utility helpers: canonical serialization and atomic file writes.
pub mod files;
pub mod serialization;

pub use files::atomic_write;
pub use serialization::{compute_sha256_hex, to_canonical_json};
