//! SDK construction errors.
//!
//! [`SdkError`] covers failures while *setting up* the SDK (bad
//! configuration, HTTP client construction).  Failures of individual
//! operations are reported as [`identity_models::AuthError`] through the
//! request's completion instead.

/// Error type for SDK setup.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. bad domain URL, empty client id).
    #[error("configuration error: {0}")]
    Config(String),

    /// The default HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display() {
        let err = SdkError::Config("client id must not be empty".into());
        assert_eq!(
            err.to_string(),
            "configuration error: client id must not be empty"
        );
    }
}
