//! Resolution of the acting user's id.
//!
//! User-scoped calls take an optional explicit id.  When none is given the
//! id is read from the `sub` claim of the bearer token.
//!
//! The token's signature is **not** verified here: the service that issued
//! it re-validates it on every call, and the claim is only used to build a
//! request path.  Never use [`decode_claims`] output for authorisation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::{Map, Value};

/// Decode the claims (middle) segment of a `header.claims.signature` token.
///
/// Returns `None` if the token does not have three segments or the claims
/// segment is not a base64url-encoded JSON object.  Trailing `=` padding is
/// tolerated.
pub fn decode_claims(token: &str) -> Option<Map<String, Value>> {
    let mut parts = token.split('.');
    let (Some(_header), Some(claims), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let bytes = URL_SAFE_NO_PAD.decode(claims.trim_end_matches('=')).ok()?;
    match serde_json::from_slice::<Value>(&bytes).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// The `sub` claim of `token`, if it can be decoded.
pub fn subject_from_token(token: &str) -> Option<String> {
    decode_claims(token)?
        .get("sub")?
        .as_str()
        .map(str::to_string)
}

/// Resolve the effective user id and percent-encode it for use as a path
/// segment.
///
/// `explicit` wins when present and non-empty; otherwise the token's `sub`
/// claim is used.  An empty id would address the users collection instead of
/// a single user.
pub fn resolve_user_id(explicit: Option<&str>, token: &str) -> Option<String> {
    let id = match explicit.filter(|id| !id.is_empty()) {
        Some(id) => id.to_string(),
        None => subject_from_token(token)?,
    };
    Some(urlencoding::encode(&id).into_owned())
}
