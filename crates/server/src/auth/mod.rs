//! Credential service: registration, password login and session tokens.
//!
//! Passwords are hashed with argon2; session tokens are HS256 JWTs carrying
//! the vendor id, valid until their embedded expiry (default 24h). Token
//! verification is stateless - there is no revocation list, so a password
//! change does not invalidate tokens already issued.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use vendstock_core::{Email, UserId};

use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::store::Store;

/// The authenticated principal for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

/// JWT claims embedded in a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Vendor id the token was signed for.
    pub sub: UserId,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Registration input for a new vendor.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Credential service.
///
/// Cheap to clone; the signing keys and store handle are shared.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthService {
    /// Create a credential service signing tokens with `secret`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, secret: &SecretString, token_ttl: Duration) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            store,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            token_ttl,
        }
    }

    /// Register a new vendor.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` if the email is malformed and
    /// `ApiError::DuplicateEmail` if it is already registered.
    pub async fn register(&self, input: NewUser) -> ApiResult<User> {
        let email = Email::parse(&input.email)
            .map_err(|e| ApiError::BadRequest(format!("invalid email: {e}")))?;

        if self
            .store
            .find_user_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(ApiError::DuplicateEmail(email.into_inner()));
        }

        let password_hash = hash_password(&input.password)?;

        let user = User {
            id: UserId::generate(),
            first_name: input.first_name,
            last_name: input.last_name,
            email,
            password_hash,
            created_at: Utc::now(),
        };

        Ok(self.store.insert_user(user).await?)
    }

    /// Authenticate a vendor and issue a session token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no vendor has this email and
    /// `ApiError::InvalidCredentials` on a password mismatch.
    pub async fn authenticate(&self, email: &str, password: &str) -> ApiResult<String> {
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| ApiError::NotFound("user".to_owned()))?;

        verify_password(password, &user.password_hash)?;

        self.issue_token(user.id, self.token_ttl)
    }

    /// Sign a session token for `user_id` expiring after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if signing fails.
    pub fn issue_token(&self, user_id: UserId, ttl: Duration) -> ApiResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a session token and resolve the caller identity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidToken` if the signature is wrong or the
    /// token has expired.
    pub fn verify(&self, token: &str) -> ApiResult<Identity> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| ApiError::InvalidToken)?;

        Ok(Identity {
            user_id: data.claims.sub,
        })
    }
}

/// Hash a password with argon2 and a fresh random salt.
fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, hash: &str) -> ApiResult<()> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ApiError::Internal(format!("stored password hash is invalid: {e}")))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| ApiError::InvalidCredentials)
}
