//! JWT minting and verification.

pub mod claims;
pub mod signer;
pub mod token;

pub use claims::Claims;
pub use signer::{HmacSigner, RejectReason, TokenSigner, Verification};
pub use token::{SignedToken, SignedTokenPair};
