use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Verified identity assertions decoded from a bearer credential.
///
/// `admin` gates access to mutating routes; `superAdmin` additionally bypasses
/// simulation mode. Expiry is enforced by the verifier, not by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub admin: bool,
    #[serde(default, rename = "superAdmin")]
    pub super_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(admin: bool, super_admin: bool, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            admin,
            super_admin,
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The credential is malformed, expired, or has a bad signature.
    #[error("credential rejected: {0}")]
    Rejected(String),

    /// The verification round-trip itself failed. Callers treat this the
    /// same as a rejected credential; the two are not distinguishable in
    /// any useful way at the request boundary.
    #[error("verifier unavailable: {0}")]
    Unavailable(String),
}

/// Identity oracle: turns a bearer credential into verified claims.
///
/// One attempt per request; callers do not retry. Implementations may
/// suspend on a remote round-trip.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Result<Claims, VerifyError>;
}

/// Verifies HS256-signed tokens against a shared secret.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    secret_configured: bool,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            secret_configured: !secret.is_empty(),
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, credential: &str) -> Result<Claims, VerifyError> {
        if !self.secret_configured {
            return Err(VerifyError::Unavailable(
                "verification secret not configured".to_string(),
            ));
        }

        let token_data = decode::<Claims>(credential, &self.decoding_key, &Validation::default())
            .map_err(|e| VerifyError::Rejected(e.to_string()))?;

        Ok(token_data.claims)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token generation error: {0}")]
    Generation(String),
    #[error("invalid signing secret")]
    InvalidSecret,
}

/// Mint a signed credential for the given claims. Used by the operator CLI
/// and by tests; the server itself only ever verifies.
pub fn generate_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| TokenError::Generation(e.to_string()))
}
