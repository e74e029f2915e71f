//! HTTP handlers.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `POST /oauth/ro` | [`resource_owner`] |
//! | `GET /api/v2/users/{id}` | [`get_user`] |
//! | `PATCH /api/v2/users/{id}` | [`patch_user`] |

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::MockError;
use crate::token::{issue_id_token, verify_id_token};
use crate::MockState;

// ---------------------------------------------------------------------------
// Token endpoint
// ---------------------------------------------------------------------------

/// Body of `POST /oauth/ro`.
#[derive(Deserialize)]
pub struct ResourceOwnerRequest {
    client_id: String,
    username: String,
    password: String,
    connection: String,
    grant_type: String,
    #[serde(default)]
    scope: Option<String>,
}

/// `POST /oauth/ro` — resource-owner password grant.
///
/// Every value in the success body is a string.
pub async fn resource_owner(
    State(state): State<Arc<MockState>>,
    Json(req): Json<ResourceOwnerRequest>,
) -> Result<Json<Map<String, Value>>, MockError> {
    if req.client_id != state.config.client_id {
        return Err(MockError::oauth(
            StatusCode::UNAUTHORIZED,
            "invalid_client",
            "Unknown client",
        ));
    }
    if req.grant_type != "password" {
        return Err(MockError::oauth(
            StatusCode::FORBIDDEN,
            "unsupported_grant_type",
            format!("Grant type '{}' not allowed for the client.", req.grant_type),
        ));
    }
    if req.connection != state.config.connection {
        return Err(MockError::oauth(
            StatusCode::BAD_REQUEST,
            "invalid_connection",
            format!("Connection '{}' does not exist", req.connection),
        ));
    }

    let user = state
        .users
        .authenticate(&req.username, &req.password)
        .await
        .ok_or_else(|| {
            MockError::oauth(
                StatusCode::UNAUTHORIZED,
                "invalid_user_password",
                "Wrong email or password.",
            )
        })?;

    let id_token = issue_id_token(&state.config, &user.user_id, Some(user.email.as_str()))?;
    info!(user_id = %user.user_id, "password grant issued");

    let mut body = Map::new();
    body.insert(
        "access_token".into(),
        uuid::Uuid::new_v4().simple().to_string().into(),
    );
    body.insert("id_token".into(), id_token.into());
    body.insert("token_type".into(), "bearer".into());
    body.insert(
        "expires_in".into(),
        state.config.token_ttl_secs.to_string().into(),
    );
    if let Some(scope) = req.scope {
        body.insert("scope".into(), scope.into());
    }
    Ok(Json(body))
}

// ---------------------------------------------------------------------------
// Users API
// ---------------------------------------------------------------------------

/// Query string of `GET /api/v2/users/{id}`.
#[derive(Deserialize)]
pub struct FieldsQuery {
    #[serde(default)]
    fields: Option<String>,
    #[serde(default)]
    include_fields: Option<bool>,
}

/// `GET /api/v2/users/{id}`.
pub async fn get_user(
    State(state): State<Arc<MockState>>,
    Path(user_id): Path<String>,
    Query(query): Query<FieldsQuery>,
    headers: HeaderMap,
) -> Result<Json<Map<String, Value>>, MockError> {
    authorize(&state, &headers, &user_id)?;

    let profile = state
        .users
        .profile(&user_id)
        .await
        .ok_or_else(inexistent_user)?;

    Ok(Json(select_fields(
        profile,
        query.fields.as_deref(),
        query.include_fields.unwrap_or(true),
    )))
}

/// `PATCH /api/v2/users/{id}`.
pub async fn patch_user(
    State(state): State<Arc<MockState>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Map<String, Value>>, MockError> {
    authorize(&state, &headers, &user_id)?;

    let Value::Object(body) = body else {
        return Err(MockError::management(
            StatusCode::BAD_REQUEST,
            "invalid_body",
            "Payload validation error: 'Expected type object'.",
        ));
    };

    let profile = state
        .users
        .patch(&user_id, body)
        .await
        .ok_or_else(inexistent_user)?;
    info!(user_id = %user_id, "user updated");
    Ok(Json(profile))
}

/// A valid id token may only read or write its own user.
fn authorize(state: &MockState, headers: &HeaderMap, user_id: &str) -> Result<(), MockError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            MockError::management(
                StatusCode::UNAUTHORIZED,
                "missing_authorization",
                "Missing authentication",
            )
        })?;

    let claims = verify_id_token(&state.config, token).ok_or_else(|| {
        MockError::management(StatusCode::UNAUTHORIZED, "invalid_token", "Invalid token")
    })?;

    if claims.sub != user_id {
        return Err(MockError::management(
            StatusCode::FORBIDDEN,
            "insufficient_scope",
            "A token may only access its own user",
        ));
    }
    Ok(())
}

fn inexistent_user() -> MockError {
    MockError::management(
        StatusCode::NOT_FOUND,
        "inexistent_user",
        "The user does not exist.",
    )
}

fn select_fields(
    profile: Map<String, Value>,
    fields: Option<&str>,
    include: bool,
) -> Map<String, Value> {
    let Some(fields) = fields.filter(|f| !f.is_empty()) else {
        return profile;
    };
    let wanted: Vec<&str> = fields.split(',').map(str::trim).collect();
    profile
        .into_iter()
        .filter(|(key, _)| wanted.contains(&key.as_str()) == include)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("user_id".into(), json!("auth0|1"));
        map.insert("email".into(), json!("a@example.com"));
        map.insert("name".into(), json!("A"));
        map
    }

    #[test]
    fn include_selected_fields() {
        let selected = select_fields(profile(), Some("email,name"), true);
        assert_eq!(selected.len(), 2);
        assert!(selected.contains_key("email"));
        assert!(!selected.contains_key("user_id"));
    }

    #[test]
    fn exclude_selected_fields() {
        let selected = select_fields(profile(), Some("email"), false);
        assert!(!selected.contains_key("email"));
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn no_fields_returns_everything() {
        assert_eq!(select_fields(profile(), None, false).len(), 3);
        assert_eq!(select_fields(profile(), Some(""), true).len(), 3);
    }
}
