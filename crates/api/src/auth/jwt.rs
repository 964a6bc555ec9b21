//! Access and refresh tokens.
//!
//! An access token is an HS256 JWT naming a user and their [`Role`]; the
//! role is decoded once here so extractors receive a ready [`Viewer`].
//! A refresh token is an opaque string handed to the client once. Only its
//! SHA-256 digest is stored, in `user_sessions`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lms_core::roles::{Role, UnknownRole};
use lms_core::types::{DbId, Timestamp};
use lms_core::viewer::Viewer;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (15) and
    /// `JWT_REFRESH_EXPIRY_DAYS` (7).
    ///
    /// # Panics
    ///
    /// Panics if the secret is missing or empty, or a lifetime is not a number.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_i64("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .map(|v| {
            v.parse()
                .unwrap_or_else(|_| panic!("{key} must be a valid i64"))
        })
        .unwrap_or(default)
}

/// Decoded access-token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: DbId,
    pub role: Role,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl Claims {
    pub fn viewer(&self) -> Viewer {
        Viewer::authenticated(self.user_id, self.role)
    }
}

/// The JWT body as it travels. `role` stays a plain string on the wire so
/// an unrecognised role is told apart from a bad signature.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: DbId,
    role: String,
    exp: i64,
    iat: i64,
    jti: String,
}

impl TryFrom<WireClaims> for Claims {
    type Error = UnknownRole;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        Ok(Claims {
            user_id: wire.sub,
            role: wire.role.parse()?,
            issued_at: wire.iat,
            expires_at: wire.exp,
        })
    }
}

/// Why an access token was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, malformed, or expired.
    #[error("invalid or expired token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// Correctly signed, but carries a role this service does not know.
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),
}

/// Sign an access token for `user_id` acting as `role`.
pub fn generate_access_token(
    user_id: DbId,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = WireClaims {
        sub: user_id,
        role: role.as_str().to_string(),
        exp: now + config.access_token_ttl_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, then resolve the role.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let data = decode::<WireClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(Claims::try_from(data.claims)?)
}

/// A freshly minted refresh token.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    /// Returned to the client and never stored.
    pub plaintext: String,
    /// What `user_sessions.refresh_token_hash` holds.
    pub hash: String,
    pub expires_at: Timestamp,
}

impl RefreshToken {
    pub fn generate(config: &JwtConfig) -> Self {
        let plaintext = Uuid::new_v4().to_string();
        Self {
            hash: hash_refresh_token(&plaintext),
            plaintext,
            expires_at: Utc::now() + Duration::days(config.refresh_token_expiry_days),
        }
    }
}

/// Hex SHA-256 of a refresh token, the lookup key for its session.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
