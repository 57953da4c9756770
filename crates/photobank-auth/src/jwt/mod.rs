//! Signed, expiring bearer tokens.

pub mod claims;
pub mod signer;

pub use claims::{
    ACCESS_TOKEN_TTL_HOURS, AccessClaims, ClaimSet, REFRESH_TOKEN_TTL_HOURS, RefreshClaims,
};
pub use signer::{IssuedToken, TokenSigner, VerifiedToken};
