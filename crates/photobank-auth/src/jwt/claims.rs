//! Claim payloads carried by access and refresh tokens.

use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use photobank_core::types::UserId;

/// Access token lifetime.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Refresh token lifetime. Shorter than the access token.
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 1;

/// A claim payload that can be signed by [`crate::TokenSigner`].
///
/// `KIND` is written to the JWT header `typ` and checked on verification,
/// so a token issued for one claim set never verifies as another.
pub trait ClaimSet: Serialize + DeserializeOwned {
    /// Header `typ` value.
    const KIND: &'static str;
}

/// Claims of an access token: the subject and the username it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — the user ID.
    pub sub: UserId,
    /// Username at issuance. Must still match the stored username.
    pub username: String,
}

impl AccessClaims {
    /// Lifetime of an access token.
    pub fn ttl() -> Duration {
        Duration::hours(ACCESS_TOKEN_TTL_HOURS)
    }
}

impl ClaimSet for AccessClaims {
    const KIND: &'static str = "access+jwt";
}

/// Claims of a refresh token: the subject only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject — the user ID.
    pub sub: UserId,
}

impl RefreshClaims {
    /// Lifetime of a refresh token.
    pub fn ttl() -> Duration {
        Duration::hours(REFRESH_TOKEN_TTL_HOURS)
    }
}

impl ClaimSet for RefreshClaims {
    const KIND: &'static str = "refresh+jwt";
}
