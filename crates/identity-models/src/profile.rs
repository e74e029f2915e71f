//! User profiles returned by the users API.

/// A user profile as returned by `GET`/`PATCH /api/v2/users/{id}`.
///
/// The profile schema is owned by the service and extended per tenant
/// (`user_metadata`, `app_metadata`, identities…), so it stays a generic
/// JSON object.
pub type UserProfile = serde_json::Map<String, serde_json::Value>;
