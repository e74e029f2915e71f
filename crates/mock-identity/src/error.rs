//! Error responses of the mock service.
//!
//! The token endpoint answers OAuth-style bodies
//! (`error` / `error_description`); the users API answers management-style
//! bodies (`statusCode`, `error`, `code`, `description`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors returned by the mock handlers.
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    /// Token endpoint failure.
    #[error("{code}: {description}")]
    OAuth {
        /// HTTP status.
        status: StatusCode,
        /// OAuth error code.
        code: &'static str,
        /// Human-readable message.
        description: String,
    },

    /// Users API failure.
    #[error("{code}: {description}")]
    Management {
        /// HTTP status.
        status: StatusCode,
        /// Management API error code.
        code: &'static str,
        /// Human-readable message.
        description: String,
    },

    /// Issuing an id token failed.
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl MockError {
    pub(crate) fn oauth(
        status: StatusCode,
        code: &'static str,
        description: impl Into<String>,
    ) -> Self {
        Self::OAuth {
            status,
            code,
            description: description.into(),
        }
    }

    pub(crate) fn management(
        status: StatusCode,
        code: &'static str,
        description: impl Into<String>,
    ) -> Self {
        Self::Management {
            status,
            code,
            description: description.into(),
        }
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::OAuth {
                status,
                code,
                description,
            } => (
                *status,
                json!({ "error": code, "error_description": description }),
            ),
            Self::Management {
                status,
                code,
                description,
            } => (
                *status,
                json!({
                    "statusCode": status.as_u16(),
                    "error": status.canonical_reason().unwrap_or("Error"),
                    "code": code,
                    "description": description,
                }),
            ),
            Self::Signing(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "server_error", "error_description": self.to_string() }),
            ),
        };

        tracing::warn!(%status, error = %self, "request rejected");
        (status, Json(body)).into_response()
    }
}
