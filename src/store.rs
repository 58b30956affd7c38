//! The user registry: an in-memory keyed store behind a reader/writer lock.

use crate::error::StoreError;
use crate::notify::Notifier;
use crate::user::{NewUser, SearchFilter, User, UserUpdate};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory registry of user records, keyed by id.
///
/// The store exclusively owns its record map. A single reader/writer lock
/// makes create/update/delete linearizable with respect to each other while
/// reads run concurrently. Every read clones records out while the lock is
/// held, so callers always get stable snapshots. The notifier is invoked
/// only after the lock has been released.
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
    notifier: Arc<dyn Notifier>,
}

impl UserStore {
    /// Create an empty store reporting to the given notifier.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            notifier,
        }
    }

    /// Insert a new record.
    ///
    /// Fails with [`StoreError::InvalidArgument`] when `id` or `username` is
    /// empty and with [`StoreError::Conflict`] when the username is already
    /// taken by any existing record. On success the store stamps both
    /// timestamps and forces `is_active` to true. A record already stored
    /// under the same id is replaced; only usernames are checked for
    /// collisions.
    pub fn create(&self, new: NewUser) -> Result<(), StoreError> {
        let NewUser {
            id,
            username,
            email,
            password,
            role,
        } = new;

        if id.is_empty() {
            let err = StoreError::InvalidArgument("id must not be empty");
            self.notifier
                .error("user create rejected", &err, &[("username", username)]);
            return Err(err);
        }
        if username.is_empty() {
            let err = StoreError::InvalidArgument("username must not be empty");
            self.notifier
                .error("user create rejected", &err, &[("user_id", id)]);
            return Err(err);
        }

        let conflict = {
            let mut users = self.users.write().expect("user map lock poisoned");
            if users.values().any(|u| u.username == username) {
                true
            } else {
                let now = Utc::now();
                users.insert(
                    id.clone(),
                    User {
                        id: id.clone(),
                        username: username.clone(),
                        email,
                        password,
                        created_at: now,
                        updated_at: now,
                        is_active: true,
                        role,
                    },
                );
                false
            }
        };

        if conflict {
            let err = StoreError::Conflict {
                username: username.clone(),
            };
            self.notifier.error(
                "username already exists",
                &err,
                &[("user_id", id), ("username", username)],
            );
            return Err(err);
        }

        self.notifier
            .info("user created", &[("user_id", id), ("username", username)]);
        Ok(())
    }

    /// Fetch a copy of the record stored under `id`.
    pub fn get(&self, id: &str) -> Result<User, StoreError> {
        let found = {
            let users = self.users.read().expect("user map lock poisoned");
            users.get(id).cloned()
        };

        found.ok_or_else(|| {
            let err = StoreError::NotFound { id: id.to_string() };
            self.notifier
                .error("user not found", &err, &[("user_id", id.to_string())]);
            err
        })
    }

    /// Apply a partial update to the record stored under `id`.
    ///
    /// Every set field in `changes` is assigned; `updated_at` is refreshed
    /// even when the update carries no changes. Username uniqueness is not
    /// re-checked here.
    pub fn update(&self, id: &str, changes: UserUpdate) -> Result<(), StoreError> {
        let applied = {
            let mut users = self.users.write().expect("user map lock poisoned");
            match users.get_mut(id) {
                Some(user) => {
                    if let Some(username) = changes.username {
                        user.username = username;
                    }
                    if let Some(email) = changes.email {
                        user.email = email;
                    }
                    if let Some(role) = changes.role {
                        user.role = role;
                    }
                    if let Some(is_active) = changes.is_active {
                        user.is_active = is_active;
                    }
                    user.updated_at = Utc::now();
                    true
                }
                None => false,
            }
        };

        if !applied {
            let err = StoreError::NotFound { id: id.to_string() };
            self.notifier.error(
                "user not found for update",
                &err,
                &[("user_id", id.to_string())],
            );
            return Err(err);
        }

        self.notifier
            .info("user updated", &[("user_id", id.to_string())]);
        Ok(())
    }

    /// Remove the record stored under `id`.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let removed = {
            let mut users = self.users.write().expect("user map lock poisoned");
            users.remove(id).is_some()
        };

        if !removed {
            let err = StoreError::NotFound { id: id.to_string() };
            self.notifier.error(
                "user not found for deletion",
                &err,
                &[("user_id", id.to_string())],
            );
            return Err(err);
        }

        self.notifier
            .info("user deleted", &[("user_id", id.to_string())]);
        Ok(())
    }

    /// Copies of all active records, in unspecified order.
    pub fn list(&self) -> Vec<User> {
        let users = self.users.read().expect("user map lock poisoned");
        users.values().filter(|u| u.is_active).cloned().collect()
    }

    /// Copies of all records matching the filter, in unspecified order.
    ///
    /// An empty filter matches every record, inactive ones included.
    pub fn search(&self, filter: &SearchFilter) -> Vec<User> {
        let users = self.users.read().expect("user map lock poisoned");
        users.values().filter(|u| filter.matches(u)).cloned().collect()
    }

    /// Total number of records, active or not.
    pub fn count(&self) -> usize {
        self.users.read().expect("user map lock poisoned").len()
    }
}
