use serde_json::Value;
use tracing::warn;

use crate::users::draft::UserPayload;
use crate::users::model::{User, UserId};

/// REST client for the user resource.
///
/// Five thin operations, no retries, no caching. Errors are opaque
/// reports; classifying them is the caller's job.
#[derive(Clone, Debug)]
pub struct UserApi {
    http: reqwest::Client,
    base_url: String,
}

const COLLECTION_PATH: &str = "/users";

fn read_path(id: &UserId) -> String {
    format!("/users/{id}")
}

// The backend registers update and delete under the singular segment,
// unlike list and read. Both spellings are part of the contract.
fn write_path(id: &UserId) -> String {
    format!("/user/{id}")
}

impl UserApi {
    pub fn new(base_url: &str) -> color_eyre::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch the full collection.
    ///
    /// A payload that is not an array coerces to an empty collection; it
    /// must never fail the render path.
    pub async fn list_users(&self) -> color_eyre::Result<Vec<User>> {
        let value: Value = self
            .http
            .get(self.url(COLLECTION_PATH))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(coerce_user_list(value))
    }

    pub async fn get_user(&self, id: &UserId) -> color_eyre::Result<User> {
        let user = self
            .http
            .get(self.url(&read_path(id)))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(user)
    }

    pub async fn create_user(&self, payload: &UserPayload) -> color_eyre::Result<User> {
        let user = self
            .http
            .post(self.url(COLLECTION_PATH))
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(user)
    }

    pub async fn update_user(&self, id: &UserId, payload: &UserPayload) -> color_eyre::Result<User> {
        let user = self
            .http
            .put(self.url(&write_path(id)))
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(user)
    }

    pub async fn delete_user(&self, id: &UserId) -> color_eyre::Result<()> {
        self.http
            .delete(self.url(&write_path(id)))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn coerce_user_list(value: Value) -> Vec<User> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<User>(item) {
                Ok(user) => Some(user),
                Err(error) => {
                    warn!(%error, "Skipping malformed user record in list response");
                    None
                }
            })
            .collect(),
        other => {
            warn!("List response is not an array: {other}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_uses_plural_segment_and_write_uses_singular() {
        let id = UserId::new("42");
        assert_eq!(read_path(&id), "/users/42");
        assert_eq!(write_path(&id), "/user/42");
        assert_eq!(COLLECTION_PATH, "/users");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = UserApi::new("http://localhost:8000/").unwrap();
        assert_eq!(api.url(COLLECTION_PATH), "http://localhost:8000/users");
    }

    #[test]
    fn non_array_payload_coerces_to_empty() {
        assert!(coerce_user_list(json!({"error": "boom"})).is_empty());
        assert!(coerce_user_list(json!("nope")).is_empty());
        assert!(coerce_user_list(Value::Null).is_empty());
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let users = coerce_user_list(json!([
            { "id": 1, "firstname": "Somchai" },
            { "firstname": "no id" },
            { "id": "a2", "age": 25 }
        ]));
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id.as_str(), "1");
        assert_eq!(users[1].age, 25);
    }
}
