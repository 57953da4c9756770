//! HS256 token issuance and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use photobank_core::config::AuthConfig;
use photobank_core::error::AppError;
use photobank_core::result::AppResult;

use super::claims::ClaimSet;

/// Wire payload: the claim set plus issue/expiry timestamps.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<C> {
    #[serde(flatten)]
    claims: C,
    iat: i64,
    exp: i64,
}

/// A freshly signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWT string.
    pub token: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// Claims recovered from a valid token.
#[derive(Debug, Clone)]
pub struct VerifiedToken<C> {
    /// The claim set.
    pub claims: C,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies stateless bearer tokens.
///
/// Validity is signature plus expiry only; there is no revocation list.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from the process-wide auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Signs `claims` with an expiry of `now + ttl`.
    pub fn issue<C: ClaimSet>(&self, claims: C, ttl: Duration) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some(C::KIND.to_string());

        let envelope = Envelope {
            claims,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&header, &envelope, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {} token: {e}", C::KIND)))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies signature, expiry and token kind, returning the claims.
    ///
    /// Fails with `ExpiredToken` once `now > exp` (plus leeway) and with
    /// `InvalidToken` for anything forged, malformed, or of another kind.
    pub fn verify<C: ClaimSet>(&self, token: &str) -> AppResult<VerifiedToken<C>> {
        let data = decode::<Envelope<C>>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::expired_token(),
                JwtErrorKind::InvalidSignature => AppError::invalid_token("Invalid token signature"),
                _ => AppError::invalid_token("Invalid token"),
            },
        )?;

        if data.header.typ.as_deref() != Some(C::KIND) {
            return Err(AppError::invalid_token("Invalid token type"));
        }

        let Envelope { claims, iat, exp } = data.claims;
        let timestamp = |secs: i64| {
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| AppError::invalid_token("Invalid token timestamp"))
        };

        Ok(VerifiedToken {
            claims,
            issued_at: timestamp(iat)?,
            expires_at: timestamp(exp)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::claims::{AccessClaims, RefreshClaims};
    use photobank_core::error::ErrorKind;
    use photobank_core::types::UserId;

    fn signer(secret: &str) -> TokenSigner {
        TokenSigner::new(&AuthConfig::with_secret(secret))
    }

    fn access(username: &str) -> AccessClaims {
        AccessClaims {
            sub: UserId::generate(),
            username: username.to_string(),
        }
    }

    #[test]
    fn test_verify_before_expiry() {
        let signer = signer("test-secret");
        let claims = access("alice");
        let issued = signer.issue(claims.clone(), AccessClaims::ttl()).unwrap();

        let verified = signer.verify::<AccessClaims>(&issued.token).unwrap();
        assert_eq!(verified.claims, claims);
        assert_eq!(verified.expires_at.timestamp(), issued.expires_at.timestamp());
        assert_eq!(
            (verified.expires_at - verified.issued_at).num_hours(),
            24
        );
    }

    #[test]
    fn test_expired() {
        let signer = signer("test-secret");
        let issued = signer
            .issue(access("alice"), Duration::seconds(-30))
            .unwrap();

        let err = signer.verify::<AccessClaims>(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpiredToken);
    }

    #[test]
    fn test_leeway_tolerates_skew() {
        let lenient = TokenSigner::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_leeway_seconds: 120,
        });
        let issued = lenient
            .issue(access("alice"), Duration::seconds(-30))
            .unwrap();
        assert!(lenient.verify::<AccessClaims>(&issued.token).is_ok());
    }

    #[test]
    fn test_wrong_secret() {
        let issued = signer("one").issue(access("alice"), AccessClaims::ttl()).unwrap();
        let err = signer("two")
            .verify::<AccessClaims>(&issued.token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_spliced_payload() {
        let signer = signer("test-secret");
        let alice = signer.issue(access("alice"), AccessClaims::ttl()).unwrap();
        let mallory = signer.issue(access("mallory"), AccessClaims::ttl()).unwrap();

        let alice_sig = alice.token.rsplit('.').next().unwrap();
        let (mallory_head, _) = mallory.token.rsplit_once('.').unwrap();
        let forged = format!("{mallory_head}.{alice_sig}");

        let err = signer.verify::<AccessClaims>(&forged).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_garbage() {
        let err = signer("test-secret")
            .verify::<AccessClaims>("not.a.token")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_kinds_do_not_cross() {
        let signer = signer("test-secret");
        let sub = UserId::generate();
        let refresh = signer
            .issue(RefreshClaims { sub }, RefreshClaims::ttl())
            .unwrap();
        let access = signer
            .issue(
                AccessClaims {
                    sub,
                    username: "alice".to_string(),
                },
                AccessClaims::ttl(),
            )
            .unwrap();

        let err = signer.verify::<AccessClaims>(&refresh.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        let err = signer.verify::<RefreshClaims>(&access.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        assert_eq!(
            signer.verify::<RefreshClaims>(&refresh.token).unwrap().claims.sub,
            sub
        );
    }

    #[test]
    fn test_refresh_payload_has_no_username() {
        let signer = signer("test-secret");
        let issued = signer
            .issue(RefreshClaims { sub: UserId::generate() }, RefreshClaims::ttl())
            .unwrap();

        let raw = decode::<serde_json::Value>(
            &issued.token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert!(raw.claims.get("username").is_none());
        assert!(raw.claims.get("sub").is_some());
        assert_eq!(raw.header.typ.as_deref(), Some("refresh+jwt"));
    }
}
