//! SDK entry point.
//!
//! [`IdentityClient`] owns the configuration and the transport and hands
//! out the [`Authentication`] and [`Users`] APIs.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use identity_sdk::{IdentityClient, SdkConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = IdentityClient::new(SdkConfig::new("client-id", "tenant.example.com")?)?;
//!
//! let credentials = client
//!     .authentication()
//!     .login("mail@example.com", "secret", "Username-Password-Authentication")
//!     .send()
//!     .await?;
//!
//! let token = credentials.id_token().unwrap_or(credentials.access_token());
//! let profile = client.users(token).find(None, None, false).send().await?;
//! println!("{profile:?}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::authentication::Authentication;
use crate::config::SdkConfig;
use crate::error::SdkError;
use crate::transport::{ReqwestTransport, Transport};
use crate::users::Users;

/// Handle to an identity service tenant.
///
/// Cloning is cheap; clones share the configuration and transport.
#[derive(Clone)]
pub struct IdentityClient {
    config: Arc<SdkConfig>,
    transport: Arc<dyn Transport>,
}

impl IdentityClient {
    /// Client using the default [`ReqwestTransport`].
    pub fn new(config: SdkConfig) -> Result<Self, SdkError> {
        Ok(Self::with_transport(config, Arc::new(ReqwestTransport::new()?)))
    }

    /// Client using a caller-supplied transport.
    pub fn with_transport(config: SdkConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// The Authentication API.
    pub fn authentication(&self) -> Authentication {
        Authentication::new(self.config.clone(), self.transport.clone())
    }

    /// The Users API, authorised with `token`.
    pub fn users(&self, token: impl Into<String>) -> Users {
        Users::new(self.config.clone(), self.transport.clone(), token.into())
    }

    /// The configuration.
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }
}

impl std::fmt::Debug for IdentityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
