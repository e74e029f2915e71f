//! Id token issuance and verification (HS256).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::MockConfig;
use crate::error::MockError;

/// Claims carried by issued id tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Issuer.
    pub iss: String,
    /// Subject: the user id.
    pub sub: String,
    /// Audience: the client id.
    pub aud: String,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// User email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Sign an id token for `user_id`.
pub fn issue_id_token(
    config: &MockConfig,
    user_id: &str,
    email: Option<&str>,
) -> Result<String, MockError> {
    let now = Utc::now();
    let claims = IdTokenClaims {
        iss: config.issuer.clone(),
        sub: user_id.to_string(),
        aud: config.client_id.clone(),
        exp: (now + Duration::seconds(config.token_ttl_secs)).timestamp(),
        iat: now.timestamp(),
        email: email.map(str::to_string),
    };

    let key = EncodingKey::from_secret(config.signing_secret.as_bytes());
    Ok(encode(&Header::new(Algorithm::HS256), &claims, &key)?)
}

/// Verify signature, audience and expiry; returns the claims.
pub fn verify_id_token(config: &MockConfig, token: &str) -> Option<IdTokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.client_id.as_str()]);
    let key = DecodingKey::from_secret(config.signing_secret.as_bytes());
    decode::<IdTokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}
