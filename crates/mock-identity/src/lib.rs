//! Mock identity service.
//!
//! Serves the password-grant token endpoint and the users API over an
//! in-memory user table, issuing HS256-signed id tokens whose `sub` is the
//! user id.  Used by the SDK's integration tests and for local development.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod token;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

pub use config::MockConfig;
pub use error::MockError;
pub use store::{MockUser, UserStore};

/// State shared across all handlers.
#[derive(Debug, Default)]
pub struct MockState {
    /// Tenant configuration.
    pub config: MockConfig,
    /// Registered users.
    pub users: UserStore,
}

impl MockState {
    /// Empty state with the given configuration.
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            users: UserStore::default(),
        }
    }
}

/// Build the service router.
pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/oauth/ro", post(routes::resource_owner))
        .route(
            "/api/v2/users/{id}",
            get(routes::get_user).patch(routes::patch_user),
        )
        .with_state(state)
}
