//! Avatar URL derivation

mod hashing;

pub use hashing::{hash_hex, AvatarUrls, HashError};
