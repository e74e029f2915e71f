//! Authentication API: resource-owner password login.

use std::collections::HashMap;
use std::sync::Arc;

use identity_models::{AuthError, Credentials};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::config::SdkConfig;
use crate::pending::PendingRequest;
use crate::transport::{HttpRequest, Transport};

/// Scope requested when the caller does not pick one.
pub const DEFAULT_SCOPE: &str = "openid";

const RESOURCE_OWNER_PATH: &str = "oauth/ro";

/// Entry point for authentication calls.
#[derive(Clone)]
pub struct Authentication {
    config: Arc<SdkConfig>,
    transport: Arc<dyn Transport>,
}

impl Authentication {
    pub(crate) fn new(config: Arc<SdkConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Log in with username and password against a database connection.
    ///
    /// ```rust,no_run
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// use identity_sdk::{IdentityClient, SdkConfig};
    ///
    /// let client = IdentityClient::new(SdkConfig::new("client-id", "tenant.example.com")?)?;
    /// let credentials = client
    ///     .authentication()
    ///     .login("mail@example.com", "secret", "Username-Password-Authentication")
    ///     .scope("openid email")
    ///     .send()
    ///     .await?;
    /// println!("{}", credentials.access_token());
    /// # Ok(())
    /// # }
    /// ```
    pub fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        connection: impl Into<String>,
    ) -> LoginRequest {
        LoginRequest {
            auth: self.clone(),
            username: username.into(),
            password: password.into(),
            connection: connection.into(),
            scope: DEFAULT_SCOPE.to_string(),
            parameters: Map::new(),
        }
    }
}

/// Builder for a password login.
///
/// Extra parameters are applied last and override any seeded field,
/// `grant_type` and `client_id` included.
#[must_use = "a login request does nothing until started"]
pub struct LoginRequest {
    auth: Authentication,
    username: String,
    password: String,
    connection: String,
    scope: String,
    parameters: Map<String, Value>,
}

impl LoginRequest {
    /// Requested scope (default [`DEFAULT_SCOPE`]).
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Add one extra parameter.
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Add several extra parameters.
    pub fn parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// The body that will be posted.
    pub fn payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("username".into(), self.username.clone().into());
        payload.insert("password".into(), self.password.clone().into());
        payload.insert("connection".into(), self.connection.clone().into());
        payload.insert("grant_type".into(), "password".into());
        payload.insert("scope".into(), self.scope.clone().into());
        payload.insert(
            "client_id".into(),
            self.auth.config.client_id().to_string().into(),
        );
        for (key, value) in &self.parameters {
            payload.insert(key.clone(), value.clone());
        }
        payload
    }

    /// Freeze the builder into a [`PendingRequest`].
    pub fn build(self) -> PendingRequest<Credentials> {
        let url = self.auth.config.endpoint(RESOURCE_OWNER_PATH);
        let request = HttpRequest::new(Method::POST, url).json(Value::Object(self.payload()));
        PendingRequest::live(self.auth.transport, request, decode_credentials)
    }

    /// Build and start; `callback` fires once with the outcome.
    pub fn start<F>(self, callback: F)
    where
        F: FnOnce(Result<Credentials, AuthError>) + Send + 'static,
    {
        self.build().start(callback);
    }

    /// Build and run.
    pub async fn send(self) -> Result<Credentials, AuthError> {
        self.build().send().await
    }
}

/// The token endpoint answers a flat object of strings.
fn decode_credentials(payload: &Value) -> Option<Credentials> {
    let map = payload
        .as_object()?
        .iter()
        .map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
        .collect::<Option<HashMap<String, String>>>()?;
    Credentials::from_map(&map)
}
