//! In-memory user table.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

/// A registered user.
#[derive(Debug, Clone)]
pub struct MockUser {
    /// Stable id, e.g. `auth0|5f1c…`.
    pub user_id: String,
    /// Login name (email).
    pub email: String,
    /// Clear-text password; this is a test double.
    pub password: String,
    /// Profile returned by the users API (includes `user_id` and `email`).
    pub profile: Map<String, Value>,
}

impl MockUser {
    /// A user with an empty `user_metadata` / `app_metadata`.
    pub fn new(user_id: &str, email: &str, password: &str) -> Self {
        let mut profile = Map::new();
        profile.insert("user_id".into(), json!(user_id));
        profile.insert("email".into(), json!(email));
        profile.insert("email_verified".into(), json!(false));
        profile.insert("user_metadata".into(), json!({}));
        profile.insert("app_metadata".into(), json!({}));

        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            profile,
        }
    }
}

/// Users keyed by id.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, MockUser>>,
}

impl UserStore {
    /// Register or replace a user.
    pub async fn insert(&self, user: MockUser) {
        self.users.write().await.insert(user.user_id.clone(), user);
    }

    /// Find the user matching a username/password pair.
    pub async fn authenticate(&self, email: &str, password: &str) -> Option<MockUser> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email && u.password == password)
            .cloned()
    }

    /// Profile of `user_id`.
    pub async fn profile(&self, user_id: &str) -> Option<Map<String, Value>> {
        self.users
            .read()
            .await
            .get(user_id)
            .map(|u| u.profile.clone())
    }

    /// Apply a PATCH body and return the updated profile.
    ///
    /// `user_metadata` and `app_metadata` are merged key by key (a `null`
    /// value removes the key); every other field replaces the stored one.
    /// `user_id` cannot be changed.
    pub async fn patch(
        &self,
        user_id: &str,
        body: Map<String, Value>,
    ) -> Option<Map<String, Value>> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id)?;

        for (key, value) in body {
            if key == "user_id" {
                continue;
            }
            match value {
                Value::Object(patch) if key == "user_metadata" || key == "app_metadata" => {
                    let entry = user
                        .profile
                        .entry(key)
                        .or_insert_with(|| Value::Object(Map::new()));
                    if !entry.is_object() {
                        *entry = Value::Object(Map::new());
                    }
                    if let Value::Object(current) = entry {
                        merge_metadata(current, patch);
                    }
                }
                value => {
                    if key == "email" {
                        if let Some(email) = value.as_str() {
                            user.email = email.to_string();
                        }
                    }
                    user.profile.insert(key, value);
                }
            }
        }

        Some(user.profile.clone())
    }
}

fn merge_metadata(current: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        if value.is_null() {
            current.remove(&key);
        } else {
            current.insert(key, value);
        }
    }
}
