//! Refresh token digests and the single-slot credential store.

pub mod hasher;
pub mod store;

pub use hasher::{DIGEST_LEN, RefreshTokenHasher, TokenDigest};
pub use store::{HashedCredentialStore, RefreshCredentialStore};
