//! Credential issuance and verification. Tokens are HS256 JWTs valid for
//! seven days; passwords are argon2-hashed off the async runtime.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tokio::task;

use crate::error::ApiError;
use crate::models::{Claims, User};

const TOKEN_VALIDITY_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Expired,
    Invalid,
}

/// Tagged verification result: callers branch on this instead of peeking
/// into an untyped decoded blob.
#[derive(Debug)]
pub enum AuthOutcome {
    Authenticated(Claims),
    Rejected(RejectReason),
}

#[derive(Clone)]
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, ApiError> {
        let exp = Utc::now()
            .checked_add_signed(Duration::days(TOKEN_VALIDITY_DAYS))
            .ok_or_else(|| ApiError::internal("Token expiry overflow"))?
            .timestamp() as usize;

        let claims = Claims {
            user_id: user.id.clone(),
            email: user.email.clone(),
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|err| {
            tracing::error!("token signing failed: {err}");
            ApiError::internal("Token signing failed")
        })
    }

    pub fn verify(&self, token: &str) -> AuthOutcome {
        let result = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        );

        match result {
            Ok(data) => AuthOutcome::Authenticated(data.claims),
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => AuthOutcome::Rejected(RejectReason::Expired),
                _ => AuthOutcome::Rejected(RejectReason::Invalid),
            },
        }
    }
}

pub async fn hash_password(password: String) -> Result<String, ApiError> {
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|_| ApiError::internal("Password hashing worker failed"))?
    .map_err(|_| ApiError::internal("Password hashing failed"))
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    task::spawn_blocking(move || match PasswordHash::new(&hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    })
    .await
    .map_err(|_| ApiError::internal("Password verification worker failed"))
}
