//! Single-use token model and value generation.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use photobank_core::types::UserId;

use super::purpose::TokenPurpose;

/// Length of a token value in hex characters.
pub const SINGLE_USE_TOKEN_LENGTH: usize = 32;

/// An opaque random value tied to one user and one purpose.
///
/// There is no expiry: a token lives until it is redeemed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SingleUseToken {
    /// The opaque value handed to the user.
    pub value: String,
    /// Owning user.
    pub user_id: UserId,
    /// Purpose namespace.
    pub purpose: TokenPurpose,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl SingleUseToken {
    /// Issues a fresh token with a newly generated value.
    pub fn issue(purpose: TokenPurpose, user_id: UserId) -> Self {
        Self {
            value: generate_token_value(),
            user_id,
            purpose,
            created_at: Utc::now(),
        }
    }
}

/// Generates a [`SINGLE_USE_TOKEN_LENGTH`]-character lowercase hex value from
/// the thread-local CSPRNG.
///
/// Uniqueness is statistical (128 bits); callers do not retry on collision.
pub fn generate_token_value() -> String {
    let mut bytes = [0u8; SINGLE_USE_TOKEN_LENGTH / 2];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
