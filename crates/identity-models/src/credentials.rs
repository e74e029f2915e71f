//! Tokens returned by the identity service's token endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire keys
// ---------------------------------------------------------------------------

const ACCESS_TOKEN: &str = "access_token";
const TOKEN_TYPE: &str = "token_type";
const ID_TOKEN: &str = "id_token";
const REFRESH_TOKEN: &str = "refresh_token";
const EXPIRES_IN: &str = "expires_in";
const SCOPE: &str = "scope";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Credentials obtained after a successful resource-owner password grant.
///
/// Only constructible from the flat string map the token endpoint returns
/// (see [`Credentials::from_map`]); immutable afterwards.
///
/// * `access_token` – token used to call protected APIs (required).
/// * `token_type`   – usually `"bearer"` (required).
/// * `id_token`     – signed JWT describing the user.
/// * `refresh_token`, `expires_in`, `scope` – optional grant details.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use identity_models::Credentials;
///
/// let map: HashMap<String, String> = [
///     ("access_token", "at"),
///     ("token_type", "bearer"),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_string(), v.to_string()))
/// .collect();
///
/// let creds = Credentials::from_map(&map).unwrap();
/// assert_eq!(creds.access_token(), "at");
/// assert!(creds.id_token().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    access_token: String,
    token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

impl Credentials {
    /// Build credentials from the token endpoint's string map.
    ///
    /// Returns `None` when `access_token` or `token_type` is missing, or when
    /// `expires_in` is present but not a whole number of seconds.
    pub fn from_map(map: &HashMap<String, String>) -> Option<Self> {
        let expires_in = map.get(EXPIRES_IN);
        if let Some(raw) = expires_in {
            raw.parse::<u64>().ok()?;
        }

        Some(Self {
            access_token: map.get(ACCESS_TOKEN)?.clone(),
            token_type: map.get(TOKEN_TYPE)?.clone(),
            id_token: map.get(ID_TOKEN).cloned(),
            refresh_token: map.get(REFRESH_TOKEN).cloned(),
            expires_in: expires_in.cloned(),
            scope: map.get(SCOPE).cloned(),
        })
    }

    /// Flatten back into the wire representation.
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(ACCESS_TOKEN.to_string(), self.access_token.clone());
        map.insert(TOKEN_TYPE.to_string(), self.token_type.clone());
        let optional = [
            (ID_TOKEN, self.id_token.clone()),
            (REFRESH_TOKEN, self.refresh_token.clone()),
            (EXPIRES_IN, self.expires_in.clone()),
            (SCOPE, self.scope.clone()),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        }
        map
    }

    /// Token used to authorise API calls.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Token type, e.g. `"bearer"`.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Signed JWT describing the authenticated user.
    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    /// Token that can be exchanged for fresh credentials.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Lifetime of the access token in seconds.
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in.as_deref()?.parse().ok()
    }

    /// Scope granted by the service.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}
