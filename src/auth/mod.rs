use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

pub mod password;

pub use password::{hash_password, verify_password, PasswordError};

/// Token lifetime used when no expiry is configured.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal: the account email
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    Config,
    #[error("token expired")]
    Expired,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("JWT generation error: {0}")]
    Encoding(String),
}

/// Issues and verifies HS256 identity tokens with a single process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    keys: Option<(EncodingKey, DecodingKey)>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("configured", &self.keys.is_some())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let keys = if secret.is_empty() {
            None
        } else {
            Some((
                EncodingKey::from_secret(secret.as_bytes()),
                DecodingKey::from_secret(secret.as_bytes()),
            ))
        };
        Self { keys, ttl }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        let hours = i64::try_from(security.jwt_expiry_hours).unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        Self::new(&security.jwt_secret, Duration::hours(hours))
    }

    pub fn is_configured(&self) -> bool {
        self.keys.is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let (encoding_key, _) = self.keys.as_ref().ok_or(TokenError::Config)?;
        let claims = Claims::new(subject, now, self.ttl);

        encode(&Header::new(Algorithm::HS256), &claims, encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify the signature and return the principal.
    pub fn parse(&self, token: &str) -> Result<String, TokenError> {
        self.parse_at(token, Utc::now())
    }

    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let (_, decoding_key) = self.keys.as_ref().ok_or(TokenError::Config)?;

        // Expiry is checked against `now` below so the clock stays injectable.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = decode::<Claims>(token, decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(e.to_string()),
        })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }

    pub fn is_valid(&self, token: &str, expected_subject: &str) -> bool {
        self.is_valid_at(token, expected_subject, Utc::now())
    }

    pub fn is_valid_at(&self, token: &str, expected_subject: &str, now: DateTime<Utc>) -> bool {
        matches!(self.parse_at(token, now), Ok(subject) if subject == expected_subject)
    }
}
