//! Shared test doubles and record builders.

use crate::error::StoreError;
use crate::notify::Notifier;
use crate::user::NewUser;
use std::sync::{Arc, Mutex};

/// One captured notification.
#[derive(Debug, Clone)]
pub struct NotifyEvent {
    pub msg: String,
    pub error: Option<StoreError>,
    pub fields: Vec<(String, String)>,
}

impl NotifyEvent {
    /// Look up a field value by key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Notifier that records every event for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<NotifyEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful-operation events, in order.
    pub fn infos(&self) -> Vec<NotifyEvent> {
        self.events
            .lock()
            .expect("events lock")
            .iter()
            .filter(|e| e.error.is_none())
            .cloned()
            .collect()
    }

    /// Failed-operation events, in order.
    pub fn errors(&self) -> Vec<NotifyEvent> {
        self.events
            .lock()
            .expect("events lock")
            .iter()
            .filter(|e| e.error.is_some())
            .cloned()
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, msg: &str, fields: &[(&str, String)]) {
        self.events.lock().expect("events lock").push(NotifyEvent {
            msg: msg.to_string(),
            error: None,
            fields: owned_fields(fields),
        });
    }

    fn error(&self, msg: &str, err: &StoreError, fields: &[(&str, String)]) {
        self.events.lock().expect("events lock").push(NotifyEvent {
            msg: msg.to_string(),
            error: Some(err.clone()),
            fields: owned_fields(fields),
        });
    }
}

fn owned_fields(fields: &[(&str, String)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Candidate record with a fresh random id, for tests that don't care
/// about the id value.
pub fn sample_user(username: &str) -> NewUser {
    NewUser {
        id: format!("u_{}", uuid::Uuid::new_v4().simple()),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "hunter2".to_string(),
        role: "member".to_string(),
    }
}
