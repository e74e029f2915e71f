//! Failure normalization.
//!
//! The OAuth endpoints answer errors as `{"error", "error_description"}`
//! while the management API uses `{"code", "description"}`.  Both shapes
//! are tried without assuming which endpoint produced the body.

use identity_models::{AuthError, FailureCause};
use serde_json::{Map, Value};

/// Map a failed call to an [`AuthError`].
///
/// `body` is the raw response body, if one was received; `cause` is
/// retained when the body carries no recognised error envelope.
pub fn normalize_error(body: Option<&[u8]>, cause: FailureCause) -> AuthError {
    let Some(payload) = body.and_then(parse_object) else {
        return AuthError::Unknown { cause };
    };

    string_pair(&payload, "error", "error_description")
        .or_else(|| string_pair(&payload, "code", "description"))
        .map_or(AuthError::Unknown { cause }, |(code, description)| {
            AuthError::Response { code, description }
        })
}

fn parse_object(bytes: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn string_pair(
    payload: &Map<String, Value>,
    code: &str,
    description: &str,
) -> Option<(String, String)> {
    let code = payload.get(code)?.as_str()?;
    let description = payload.get(description)?.as_str()?;
    Some((code.to_string(), description.to_string()))
}
