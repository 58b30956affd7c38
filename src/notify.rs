//! Operation notifications for observability.

use crate::error::StoreError;

/// Collaborator notified after each store operation completes.
///
/// Notifications are fire-and-forget: the store never consults the notifier
/// for decisions, and implementations must be safe to call from many threads
/// at once. Fields carry the operation's subject as key/value context
/// (e.g. `user_id`, `username`).
pub trait Notifier: Send + Sync {
    /// Report a successful operation.
    fn info(&self, msg: &str, fields: &[(&str, String)]);

    /// Report a failed operation along with its error.
    fn error(&self, msg: &str, err: &StoreError, fields: &[(&str, String)]);
}

/// Notifier that writes one line per event to stderr.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn info(&self, msg: &str, fields: &[(&str, String)]) {
        eprintln!("[roster] {}{}", msg, format_fields(fields));
    }

    fn error(&self, msg: &str, err: &StoreError, fields: &[(&str, String)]) {
        eprintln!("[roster] {}: {}{}", msg, err, format_fields(fields));
    }
}

/// Notifier that discards every event.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn info(&self, _msg: &str, _fields: &[(&str, String)]) {}

    fn error(&self, _msg: &str, _err: &StoreError, _fields: &[(&str, String)]) {}
}

fn format_fields(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!(" {}={}", key, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fields() {
        assert_eq!(format_fields(&[]), "");
        assert_eq!(
            format_fields(&[("user_id", "u1".to_string()), ("username", "alice".to_string())]),
            " user_id=u1 username=alice"
        );
    }
}
