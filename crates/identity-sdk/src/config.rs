//! SDK configuration.
//!
//! [`SdkConfig`] holds the client id and the tenant's base URL.  It is
//! built once and shared read-only by every request builder.

use reqwest::Url;

use crate::error::SdkError;

/// Static configuration for an SDK instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    client_id: String,
    domain_url: Url,
}

impl SdkConfig {
    /// Build a configuration.
    ///
    /// `domain` may be a bare host (`tenant.example.com`, HTTPS assumed) or
    /// a full `http(s)://` URL, optionally with a base path.
    ///
    /// ```
    /// use identity_sdk::SdkConfig;
    ///
    /// let cfg = SdkConfig::new("client", "tenant.example.com").unwrap();
    /// assert_eq!(cfg.domain_url().as_str(), "https://tenant.example.com/");
    /// ```
    pub fn new(client_id: impl Into<String>, domain: &str) -> Result<Self, SdkError> {
        let client_id = client_id.into();
        if client_id.trim().is_empty() {
            return Err(SdkError::Config("client id must not be empty".into()));
        }

        let domain = domain.trim();
        if domain.is_empty() {
            return Err(SdkError::Config("domain must not be empty".into()));
        }

        let raw = if domain.contains("://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        };

        let mut domain_url = Url::parse(&raw)
            .map_err(|e| SdkError::Config(format!("invalid domain \"{domain}\": {e}")))?;

        if !matches!(domain_url.scheme(), "http" | "https") {
            return Err(SdkError::Config(format!(
                "unsupported scheme \"{}\" in domain \"{domain}\"",
                domain_url.scheme()
            )));
        }

        // Relative joins drop the last path segment unless it ends with '/'.
        if !domain_url.path().ends_with('/') {
            let path = format!("{}/", domain_url.path());
            domain_url.set_path(&path);
        }

        Ok(Self {
            client_id,
            domain_url,
        })
    }

    /// The application's client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Base URL of the tenant, always ending with `/`.
    pub fn domain_url(&self) -> &Url {
        &self.domain_url
    }

    /// Resolve `path` (no leading slash) against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Url {
        let mut url = self.domain_url.clone();
        let joined = format!("{}{}", url.path(), path.trim_start_matches('/'));
        url.set_path(&joined);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_defaults_to_https() {
        let cfg = SdkConfig::new("cid", "samples.example.com").unwrap();
        assert_eq!(cfg.domain_url().as_str(), "https://samples.example.com/");
        assert_eq!(cfg.client_id(), "cid");
    }

    #[test]
    fn base_path_is_kept() {
        let cfg = SdkConfig::new("cid", "http://localhost:8080/tenant").unwrap();
        assert_eq!(
            cfg.endpoint("oauth/ro").as_str(),
            "http://localhost:8080/tenant/oauth/ro"
        );
    }

    #[test]
    fn endpoint_keeps_percent_encoded_segments() {
        let cfg = SdkConfig::new("cid", "https://samples.example.com").unwrap();
        assert_eq!(
            cfg.endpoint("api/v2/users/auth0%7C123").as_str(),
            "https://samples.example.com/api/v2/users/auth0%7C123"
        );
    }

    #[test]
    fn empty_client_id_rejected() {
        let err = SdkConfig::new("  ", "samples.example.com").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn non_http_scheme_rejected() {
        let err = SdkConfig::new("cid", "ftp://samples.example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn garbage_domain_rejected() {
        assert!(SdkConfig::new("cid", "http://").is_err());
    }
}
