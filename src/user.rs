//! User record and the descriptors used to create, update, and search it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Caller-assigned primary key; immutable after creation.
    pub id: String,
    /// Unique across all records; checked only at create time.
    pub username: String,
    pub email: String,
    /// Write-only secret; never crosses the serialization boundary.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Set once when the record is created.
    pub created_at: DateTime<Utc>,
    /// Set at creation and refreshed on every successful mutation.
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
    pub role: String,
}

/// Candidate record for [`UserStore::create`](crate::store::UserStore::create).
///
/// `id` and `username` are required; the store owns the timestamps and
/// forces `is_active` to true regardless of what the caller wants.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Field-by-field update descriptor. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// Build an update from a loose JSON mapping.
    ///
    /// Recognized keys are `username`, `email`, `role` (strings) and
    /// `is_active` (boolean). Unrecognized keys, wrong-typed values, and
    /// non-object input are ignored rather than rejected.
    pub fn from_json(value: &Value) -> Self {
        let mut update = Self::default();
        let Some(map) = value.as_object() else {
            return update;
        };
        for (key, value) in map {
            match key.as_str() {
                "username" => update.username = value.as_str().map(str::to_string),
                "email" => update.email = value.as_str().map(str::to_string),
                "role" => update.role = value.as_str().map(str::to_string),
                "is_active" => update.is_active = value.as_bool(),
                _ => {}
            }
        }
        update
    }
}

/// Search criteria; a record matches when every set field is equal.
///
/// An all-`None` filter matches every record, inactive ones included.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub username: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl SearchFilter {
    /// Build a filter from a loose JSON mapping, with the same lenient
    /// rules as [`UserUpdate::from_json`].
    pub fn from_json(value: &Value) -> Self {
        let mut filter = Self::default();
        let Some(map) = value.as_object() else {
            return filter;
        };
        for (key, value) in map {
            match key.as_str() {
                "username" => filter.username = value.as_str().map(str::to_string),
                "role" => filter.role = value.as_str().map(str::to_string),
                "is_active" => filter.is_active = value.as_bool(),
                _ => {}
            }
        }
        filter
    }

    /// Whether the record satisfies every set criterion.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(username) = &self.username {
            if &user.username != username {
                return false;
            }
        }
        if let Some(role) = &self.role {
            if &user.role != role {
                return false;
            }
        }
        if let Some(is_active) = self.is_active {
            if user.is_active != is_active {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(username: &str, role: &str, is_active: bool) -> User {
        let now = Utc::now();
        User {
            id: format!("u_{}", username),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "hunter2".to_string(),
            created_at: now,
            updated_at: now,
            is_active,
            role: role.to_string(),
        }
    }

    #[test]
    fn test_password_never_serialized() {
        let value = serde_json::to_value(user("alice", "admin", true)).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("password"));
        assert_eq!(obj["id"], "u_alice");
        assert_eq!(obj["username"], "alice");
        assert_eq!(obj["email"], "alice@example.com");
        assert_eq!(obj["role"], "admin");
        assert_eq!(obj["is_active"], true);
        assert!(obj.contains_key("created_at"));
        assert!(obj.contains_key("updated_at"));
    }

    #[test]
    fn test_password_optional_on_deserialize() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "username": "alice",
            "email": "a@x.com",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "is_active": true,
            "role": "member",
        }))
        .unwrap();
        assert_eq!(user.password, "");
    }

    #[test]
    fn test_update_from_json_takes_recognized_fields() {
        let update = UserUpdate::from_json(&json!({
            "username": "bob",
            "email": "b@x.com",
            "role": "admin",
            "is_active": false,
        }));
        assert_eq!(update.username.as_deref(), Some("bob"));
        assert_eq!(update.email.as_deref(), Some("b@x.com"));
        assert_eq!(update.role.as_deref(), Some("admin"));
        assert_eq!(update.is_active, Some(false));
    }

    #[test]
    fn test_update_from_json_ignores_unknown_and_mistyped() {
        let update = UserUpdate::from_json(&json!({
            "username": 42,
            "is_active": "not-a-bool",
            "password": "sneaky",
            "bogus": true,
        }));
        assert!(update.username.is_none());
        assert!(update.email.is_none());
        assert!(update.role.is_none());
        assert!(update.is_active.is_none());

        // Non-object input degrades to an empty update
        let update = UserUpdate::from_json(&json!("nope"));
        assert!(update.username.is_none() && update.is_active.is_none());
    }

    #[test]
    fn test_filter_from_json_lenient() {
        let filter = SearchFilter::from_json(&json!({
            "role": "admin",
            "is_active": "yes",
            "email": "ignored@x.com",
        }));
        assert_eq!(filter.role.as_deref(), Some("admin"));
        assert!(filter.is_active.is_none());
        assert!(filter.username.is_none());
    }

    #[test]
    fn test_filter_matches() {
        let alice = user("alice", "admin", true);
        let bob = user("bob", "member", false);

        let everything = SearchFilter::default();
        assert!(everything.matches(&alice));
        assert!(everything.matches(&bob));

        let admins = SearchFilter {
            role: Some("admin".to_string()),
            ..Default::default()
        };
        assert!(admins.matches(&alice));
        assert!(!admins.matches(&bob));

        let active_alice = SearchFilter {
            username: Some("alice".to_string()),
            is_active: Some(true),
            ..Default::default()
        };
        assert!(active_alice.matches(&alice));
        assert!(!active_alice.matches(&bob));
    }
}
