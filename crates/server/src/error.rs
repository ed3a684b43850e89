//! Unified error handling for API operations.
//!
//! Every service operation returns `Result<T, ApiError>`. An `ApiError`
//! converts into an `async_graphql::Error` carrying a machine-readable
//! `code` extension alongside the human-readable message. There is exactly
//! one failure per operation; nothing is logged-and-swallowed.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error taxonomy for the API surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness violation on a User or Client email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Malformed, tampered or expired session token.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Caller is not the owning vendor of the resource (or not logged in).
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// An order line asked for more units than the product has in stock.
    #[error("{product} exceeds available stock")]
    InsufficientStock {
        /// Name of the product that could not be reserved.
        product: String,
    },

    /// Malformed input (bad id, invalid email shape, negative price).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Persistence or crypto failure. Details stay server-side.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable code exposed in GraphQL error extensions.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ApiError> for async_graphql::Error {
    fn from(err: ApiError) -> Self {
        if matches!(err, ApiError::Internal(_)) {
            tracing::error!(error = %err, "internal error during request");
        }

        // Internal details are not exposed to clients
        let message = match &err {
            ApiError::Internal(_) => "internal server error".to_owned(),
            other => other.to_string(),
        };

        Self::new(message).extend_with(|_, ext| ext.set("code", err.code()))
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
