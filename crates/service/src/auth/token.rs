//! JWT issue/verify. HS256, secret from configuration, expiry baked into the
//! claims; expiry is the only invalidation mechanism (no revocation list).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::AuthError;

/// Payload asserted by a login token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub exp: usize,
}

pub fn issue(
    user_id: Uuid,
    username: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, AuthError> {
    let exp = (Utc::now() + ttl).timestamp() as usize;
    let claims = Claims { id: user_id.to_string(), username: username.to_string(), exp };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Any decode failure, signature mismatch or expiry included, maps to
/// `Forbidden`; the caller has already established that a token was presented.
pub fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::Forbidden)
}
