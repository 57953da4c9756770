//! Unified application error types for Photobank.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the `?` operator. Domain failures (credentials,
//! tokens, input, authorization) each have their own [`ErrorKind`];
//! collaborator faults keep an infrastructure kind and are never
//! reinterpreted as domain failures.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Identifier/password pair did not authenticate. Same shape whether the
    /// user is unknown or the password is wrong.
    InvalidCredentials,
    /// The supplied password does not satisfy the password policy.
    WeakCredential,
    /// A single-use token could not be found.
    TokenNotFound,
    /// A signed or single-use token is forged, malformed, or unresolvable.
    InvalidToken,
    /// A signed token is past its expiry.
    ExpiredToken,
    /// A required input field was absent or empty.
    MissingInput,
    /// The acting identity may not perform the operation.
    Forbidden,
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate username or email).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An external service (mail transport) failed.
    ExternalService,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind is a recoverable domain failure that may be shown
    /// to a client verbatim.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::Database
                | Self::Configuration
                | Self::Serialization
                | Self::ExternalService
                | Self::Internal
        )
    }

    /// HTTP-style status code used when translating at the request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::ExpiredToken => 401,
            Self::WeakCredential | Self::MissingInput | Self::Validation => 400,
            Self::Forbidden => 403,
            Self::TokenNotFound | Self::NotFound => 404,
            Self::Conflict => 409,
            Self::ExternalService => 502,
            Self::Database | Self::Configuration | Self::Serialization | Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::WeakCredential => write!(f, "WEAK_CREDENTIAL"),
            Self::TokenNotFound => write!(f, "TOKEN_NOT_FOUND"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::ExpiredToken => write!(f, "EXPIRED_TOKEN"),
            Self::MissingInput => write!(f, "MISSING_INPUT"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Photobank.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid credentials")
    }

    /// Create a weak-credential error.
    pub fn weak_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WeakCredential, message)
    }

    /// Create a token-not-found error.
    pub fn token_not_found() -> Self {
        Self::new(ErrorKind::TokenNotFound, "Token not found")
    }

    /// Create an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Create an expired-token error.
    pub fn expired_token() -> Self {
        Self::new(ErrorKind::ExpiredToken, "Token has expired")
    }

    /// Create a missing-input error.
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingInput, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Message safe to return to a client.
    ///
    /// Domain failures keep their message; infrastructure failures collapse
    /// into a generic message so no internal detail leaks.
    pub fn public_message(&self) -> &str {
        if self.kind.is_client_error() {
            &self.message
        } else {
            "Internal server error"
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::with_source(ErrorKind::Internal, format!("Blocking task failed: {err}"), err)
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::with_source(ErrorKind::Database, format!("Database error: {err}"), err)
    }
}
