//! Mock service configuration.

/// Settings for a mock identity tenant.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Client id accepted by the token endpoint and used as token audience.
    pub client_id: String,
    /// Issuer written into id tokens (`iss`).
    pub issuer: String,
    /// HMAC secret used to sign and verify id tokens.
    pub signing_secret: String,
    /// Database connection users log in against.
    pub connection: String,
    /// Lifetime of issued id tokens, in seconds.
    pub token_ttl_secs: i64,
    /// Port to listen on (default `4000`).
    pub listen_port: u16,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            client_id: "mock-client".to_string(),
            issuer: "http://localhost:4000/".to_string(),
            signing_secret: "mock-identity-dev-secret".to_string(),
            connection: "Username-Password-Authentication".to_string(),
            token_ttl_secs: 86_400,
            listen_port: 4000,
        }
    }
}

impl MockConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable              | Default                            |
    /// |-----------------------|------------------------------------|
    /// | `MOCK_PORT`           | `4000`                             |
    /// | `MOCK_CLIENT_ID`      | `mock-client`                      |
    /// | `MOCK_SIGNING_SECRET` | `mock-identity-dev-secret`         |
    /// | `MOCK_CONNECTION`     | `Username-Password-Authentication` |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let listen_port: u16 = std::env::var("MOCK_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.listen_port);

        Self {
            client_id: std::env::var("MOCK_CLIENT_ID").unwrap_or(defaults.client_id),
            issuer: format!("http://localhost:{listen_port}/"),
            signing_secret: std::env::var("MOCK_SIGNING_SECRET")
                .unwrap_or(defaults.signing_secret),
            connection: std::env::var("MOCK_CONNECTION").unwrap_or(defaults.connection),
            token_ttl_secs: defaults.token_ttl_secs,
            listen_port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listen_port() {
        assert_eq!(MockConfig::default().listen_port, 4000);
    }

    #[test]
    fn issuer_follows_port() {
        let cfg = MockConfig::from_env();
        assert!(cfg.issuer.ends_with(&format!(":{}/", cfg.listen_port)));
    }
}
