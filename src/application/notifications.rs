use crate::domain::{Notification, NotificationId, NotificationKind};

/// Single-slot toast state. A new toast evicts the previous one; the caller
/// schedules `dismiss` for each id it gets back.
#[derive(Debug, Default)]
pub struct NotificationManager {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationManager {
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let notification = Notification {
            id,
            message: message.into(),
            kind,
        };
        match kind {
            NotificationKind::Success => tracing::info!(text = %notification.message, "Notify"),
            NotificationKind::Error => tracing::warn!(text = %notification.message, "Notify"),
        }
        self.current = Some(notification);
        id
    }

    /// Remove the toast if it is still the one identified by `id`. Dismissing
    /// a toast that was already replaced does nothing.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match &self.current {
            Some(n) if n.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_replaces_previous() {
        let mut notifications = NotificationManager::default();
        notifications.show("first", NotificationKind::Success);
        notifications.show("second", NotificationKind::Error);

        let current = notifications.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, NotificationKind::Error);
    }

    #[test]
    fn test_stale_dismiss_is_noop() {
        let mut notifications = NotificationManager::default();
        let old = notifications.show("first", NotificationKind::Success);
        let new = notifications.show("second", NotificationKind::Success);

        assert!(!notifications.dismiss(old));
        assert_eq!(notifications.current().unwrap().id, new);

        assert!(notifications.dismiss(new));
        assert!(notifications.current().is_none());
        assert!(!notifications.dismiss(new));
    }
}
