//! Users API: read and update a user profile.
//!
//! Every call carries `Authorization: Bearer {token}`.  When no user id is
//! given, the id is taken from the token's `sub` claim (see
//! [`crate::identity`]).

use std::sync::Arc;

use identity_models::{AuthError, FailureCause, UserProfile};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::config::SdkConfig;
use crate::identity::resolve_user_id;
use crate::pending::PendingRequest;
use crate::transport::{HttpRequest, Transport};

const USERS_PATH: &str = "api/v2/users";

/// Users API bound to a bearer token.
#[derive(Clone)]
pub struct Users {
    config: Arc<SdkConfig>,
    transport: Arc<dyn Transport>,
    token: String,
}

impl Users {
    pub(crate) fn new(
        config: Arc<SdkConfig>,
        transport: Arc<dyn Transport>,
        token: String,
    ) -> Self {
        Self {
            config,
            transport,
            token,
        }
    }

    /// The bearer token used for identity resolution and authorisation.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Fetch a user.
    ///
    /// `fields` restricts the returned attributes; `include_fields` selects
    /// whether those fields are included (`true`) or excluded (`false`).
    /// `include_fields` has no effect without `fields`.
    pub fn find(
        &self,
        id: Option<&str>,
        fields: Option<&[&str]>,
        include_fields: bool,
    ) -> PendingRequest<UserProfile> {
        let Some(user_id) = resolve_user_id(id, &self.token) else {
            return missing_user_id("fetch");
        };

        let mut url = self.config.endpoint(&format!("{USERS_PATH}/{user_id}"));
        if let Some(fields) = fields.filter(|f| !f.is_empty()) {
            url.query_pairs_mut()
                .append_pair("fields", &fields.join(","))
                .append_pair("include_fields", &include_fields.to_string());
        }

        let request = self.authorized(Method::GET, url);
        PendingRequest::live(self.transport.clone(), request, decode_profile)
    }

    /// Update a user.
    ///
    /// The body is `extra_params` with `user_metadata` / `app_metadata`
    /// set on top when given.  Omitted metadata leaves any same-named key in
    /// `extra_params` untouched.
    pub fn update(
        &self,
        id: Option<&str>,
        user_metadata: Option<Map<String, Value>>,
        app_metadata: Option<Map<String, Value>>,
        extra_params: Option<Map<String, Value>>,
    ) -> PendingRequest<UserProfile> {
        let Some(user_id) = resolve_user_id(id, &self.token) else {
            return missing_user_id("update");
        };

        let mut body = extra_params.unwrap_or_default();
        if let Some(metadata) = user_metadata {
            body.insert("user_metadata".into(), Value::Object(metadata));
        }
        if let Some(metadata) = app_metadata {
            body.insert("app_metadata".into(), Value::Object(metadata));
        }

        let url = self.config.endpoint(&format!("{USERS_PATH}/{user_id}"));
        let request = self.authorized(Method::PATCH, url).json(Value::Object(body));
        PendingRequest::live(self.transport.clone(), request, decode_profile)
    }

    fn authorized(&self, method: Method, url: reqwest::Url) -> HttpRequest {
        HttpRequest::new(method, url).header("Authorization", format!("Bearer {}", self.token))
    }
}

fn missing_user_id(action: &'static str) -> PendingRequest<UserProfile> {
    PendingRequest::failed(AuthError::Unknown {
        cause: FailureCause::MissingUserId { action },
    })
}

fn decode_profile(payload: &Value) -> Option<UserProfile> {
    payload.as_object().cloned()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::identity::tests::token_with_claims;
    use crate::pending::tests::RecordingTransport;

    fn users(transport: Arc<RecordingTransport>, token: &str) -> Users {
        let config = SdkConfig::new("CLIENT_ID", "https://samples.example.com").unwrap();
        Users::new(Arc::new(config), transport, token.to_string())
    }

    fn metadata(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), json!(v)))
            .collect()
    }

    #[test]
    fn find_uses_subject_from_token() {
        let token = token_with_claims(&json!({ "sub": "abc" }));
        let transport = RecordingTransport::replying(200, "{}");
        let pending = users(transport, &token).find(None, None, false);
        let request = pending.request().unwrap();

        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url.as_str(),
            "https://samples.example.com/api/v2/users/abc"
        );
        assert_eq!(
            request.header_value("Authorization"),
            Some(format!("Bearer {token}").as_str())
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn find_encodes_explicit_id() {
        let transport = RecordingTransport::replying(200, "{}");
        let pending = users(transport, "opaque").find(Some("a|b"), None, false);
        let request = pending.request().unwrap();

        let segment = request.url.path_segments().unwrap().last().unwrap().to_string();
        assert_eq!(segment, "a%7Cb");
        assert_eq!(urlencoding::decode(&segment).unwrap(), "a|b");
    }

    #[test]
    fn find_with_fields_adds_query() {
        let transport = RecordingTransport::replying(200, "{}");
        let pending =
            users(transport, "opaque").find(Some("abc"), Some(&["email", "name"][..]), true);
        let url = &pending.request().unwrap().url;
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                ("fields".to_string(), "email,name".to_string()),
                ("include_fields".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn find_with_empty_fields_has_no_query() {
        let transport = RecordingTransport::replying(200, "{}");
        let pending = users(transport, "opaque").find(Some("abc"), Some(&[][..]), true);
        assert!(pending.request().unwrap().url.query().is_none());
    }

    #[test]
    fn update_with_user_metadata_only() {
        let transport = RecordingTransport::replying(200, "{}");
        let pending = users(transport, "opaque").update(
            Some("abc"),
            Some(metadata(&[("k", "v")])),
            None,
            None,
        );
        let request = pending.request().unwrap();

        assert_eq!(request.method, Method::PATCH);
        assert_eq!(
            request.url.as_str(),
            "https://samples.example.com/api/v2/users/abc"
        );
        assert_eq!(request.body, Some(json!({ "user_metadata": { "k": "v" } })));
    }

    #[test]
    fn update_merges_extra_params() {
        let transport = RecordingTransport::replying(200, "{}");
        let mut extra = metadata(&[("email", "new@example.com")]);
        extra.insert("app_metadata".into(), json!({ "plan": "free" }));
        extra.insert("user_metadata".into(), json!({ "old": "x" }));

        let pending = users(transport, "opaque").update(
            Some("abc"),
            Some(metadata(&[("k", "v")])),
            None,
            Some(extra),
        );
        assert_eq!(
            pending.request().unwrap().body,
            Some(json!({
                "email": "new@example.com",
                "user_metadata": { "k": "v" },
                "app_metadata": { "plan": "free" },
            }))
        );
    }

    #[tokio::test]
    async fn find_without_any_id_fails_locally() {
        let token = token_with_claims(&json!({ "aud": "x" }));
        let transport = RecordingTransport::replying(200, "{}");
        let err = users(transport.clone(), &token)
            .find(None, None, false)
            .send()
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthError::Unknown {
                cause: FailureCause::MissingUserId { action: "fetch" }
            }
        );
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn update_without_any_id_fails_locally() {
        let transport = RecordingTransport::replying(200, "{}");
        let pending = users(transport.clone(), "not-a-jwt").update(None, None, None, None);
        assert!(pending.request().is_none());

        let (tx, rx) = tokio::sync::oneshot::channel();
        pending.start(move |outcome| {
            let _ = tx.send(outcome);
        });
        assert_eq!(
            rx.await.unwrap().unwrap_err().to_string(),
            "request failed: no id of a user supplied to update"
        );
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn empty_id_never_targets_the_collection() {
        let transport = RecordingTransport::replying(200, "{}");
        let pending = users(transport, "opaque").find(Some(""), None, false);
        assert!(pending.request().is_none());
        assert_eq!(
            pending.error(),
            Some(&AuthError::Unknown {
                cause: FailureCause::MissingUserId { action: "fetch" }
            })
        );
    }

    #[tokio::test]
    async fn find_returns_profile() {
        let transport = RecordingTransport::replying(
            200,
            r#"{"user_id":"auth0|1","email":"a@example.com"}"#,
        );
        let profile = users(transport, "opaque")
            .find(Some("auth0|1"), None, false)
            .send()
            .await
            .unwrap();
        assert_eq!(profile["email"], "a@example.com");
    }

    #[tokio::test]
    async fn rejected_token_is_response_error() {
        let transport = RecordingTransport::replying(
            401,
            r#"{"statusCode":401,"error":"Unauthorized","code":"invalid_token","description":"Invalid token"}"#,
        );
        let err = users(transport, "opaque")
            .update(Some("abc"), None, Some(Map::new()), None)
            .send()
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::Response {
                code: "invalid_token".into(),
                description: "Invalid token".into(),
            }
        );
    }

    #[tokio::test]
    async fn non_object_profile_is_invalid_response() {
        let transport = RecordingTransport::replying(200, r#""just a string""#);
        let err = users(transport, "opaque")
            .find(Some("abc"), None, false)
            .send()
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::InvalidResponse {
                raw_payload: json!("just a string")
            }
        );
    }
}
