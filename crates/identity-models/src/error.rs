//! Error taxonomy shared by every SDK operation.
//!
//! Each failed call resolves to exactly one [`AuthError`] variant. The enum is
//! closed, so callers branch on all three kinds.

use serde_json::Value;

/// Failure of an identity-service operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// The service answered with a structured error body.
    #[error("identity service error {code}: {description}")]
    Response {
        /// Machine-readable error code (e.g. `invalid_user_password`).
        code: String,
        /// Human-readable message.
        description: String,
    },

    /// The call succeeded but the payload did not have the expected shape.
    ///
    /// The payload may carry tokens, so it is left out of the `Display` text.
    #[error("unexpected response payload")]
    InvalidResponse {
        /// The payload as received, kept for diagnostics.
        raw_payload: Value,
    },

    /// Any other failure.
    #[error("request failed: {cause}")]
    Unknown {
        /// The underlying cause.
        #[source]
        cause: FailureCause,
    },
}

impl AuthError {
    /// Error code reported by the service, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Response { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Error description reported by the service, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Response { description, .. } => Some(description),
            _ => None,
        }
    }
}

impl From<FailureCause> for AuthError {
    fn from(cause: FailureCause) -> Self {
        Self::Unknown { cause }
    }
}

/// Underlying cause carried by [`AuthError::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureCause {
    /// The transport failed before any response arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Non-success status without a recognised error body.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// A success response whose body was not JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// A callback-style request was started outside any Tokio runtime.
    #[error("no async runtime available to run the request")]
    NoRuntime,

    /// No user id was given and none could be read from the bearer token.
    #[error("no id of a user supplied to {action}")]
    MissingUserId {
        /// The operation that needed the id (`"fetch"`, `"update"`).
        action: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_display() {
        let err = AuthError::Response {
            code: "invalid_user_password".into(),
            description: "Wrong email or password.".into(),
        };
        assert_eq!(
            err.to_string(),
            "identity service error invalid_user_password: Wrong email or password."
        );
        assert_eq!(err.code(), Some("invalid_user_password"));
        assert_eq!(err.description(), Some("Wrong email or password."));
    }

    #[test]
    fn missing_user_id_display() {
        let err = AuthError::from(FailureCause::MissingUserId { action: "update" });
        assert_eq!(
            err.to_string(),
            "request failed: no id of a user supplied to update"
        );
        assert!(err.code().is_none());
    }

    #[test]
    fn unknown_exposes_source() {
        use std::error::Error as _;

        let err = AuthError::from(FailureCause::Status { status: 502 });
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("server responded with status 502"));
    }

    #[test]
    fn invalid_response_keeps_payload() {
        let payload = serde_json::json!(["not", "an", "object"]);
        let err = AuthError::InvalidResponse {
            raw_payload: payload.clone(),
        };
        match err {
            AuthError::InvalidResponse { raw_payload } => assert_eq!(raw_payload, payload),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn invalid_response_display_omits_payload() {
        let err = AuthError::InvalidResponse {
            raw_payload: serde_json::json!({ "access_token": "SECRET_AT" }),
        };
        assert_eq!(err.to_string(), "unexpected response payload");
    }
}
