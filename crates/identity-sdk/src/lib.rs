//! # Identity SDK
//!
//! Client SDK for an OAuth identity service.
//!
//! The SDK provides:
//!
//! * [`IdentityClient`] — entry point holding the tenant configuration and
//!   the HTTP transport.
//! * [`Authentication`] — resource-owner password login yielding
//!   [`Credentials`].
//! * [`Users`] — fetch and update a user profile with a bearer token.
//! * [`PendingRequest`] — the handle every call returns; it resolves once,
//!   to a decoded value or a single [`AuthError`].
//! * [`Transport`] — the seam to plug in a custom HTTP stack.
//!
//! Shared value types from [`identity_models`] are re-exported.

pub mod authentication;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod normalize;
pub mod pending;
pub mod transport;
pub mod users;

pub use authentication::{Authentication, LoginRequest, DEFAULT_SCOPE};
pub use client::IdentityClient;
pub use config::SdkConfig;
pub use error::SdkError;
pub use pending::PendingRequest;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
pub use users::Users;

pub use identity_models::{AuthError, Credentials, FailureCause, UserProfile};
