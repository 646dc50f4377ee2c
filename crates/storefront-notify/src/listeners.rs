//! Listeners for notifications arriving on the device.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A notification delivered to the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedNotification {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub data: Value,
    pub received_at: DateTime<Utc>,
}

/// The user interacted with a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub notification: ReceivedNotification,
    /// Action identifier; the default action is a plain tap.
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerKind {
    Received,
    Response,
}

/// Handle returned when adding a listener. Pass it back to remove it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
    kind: ListenerKind,
}

type ReceivedFn = Arc<dyn Fn(&ReceivedNotification) + Send + Sync>;
type ResponseFn = Arc<dyn Fn(&NotificationResponse) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    received: Vec<(u64, ReceivedFn)>,
    responses: Vec<(u64, ResponseFn)>,
}

/// Registered notification listeners.
///
/// Listeners run on the dispatching thread, outside the registry lock, so a
/// listener may add or remove listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    inner: Mutex<Listeners>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Listeners> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn on_received(
        &self,
        listener: impl Fn(&ReceivedNotification) + Send + Sync + 'static,
    ) -> Subscription {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.received.push((id, Arc::new(listener)));
        Subscription {
            id,
            kind: ListenerKind::Received,
        }
    }

    /// Called when the user taps a notification.
    pub fn on_response(
        &self,
        listener: impl Fn(&NotificationResponse) + Send + Sync + 'static,
    ) -> Subscription {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.responses.push((id, Arc::new(listener)));
        Subscription {
            id,
            kind: ListenerKind::Response,
        }
    }

    /// Returns whether the listener was still registered.
    pub fn remove(&self, subscription: &Subscription) -> bool {
        let mut inner = self.lock();
        let id = subscription.id;
        match subscription.kind {
            ListenerKind::Received => {
                let before = inner.received.len();
                inner.received.retain(|(i, _)| *i != id);
                inner.received.len() < before
            }
            ListenerKind::Response => {
                let before = inner.responses.len();
                inner.responses.retain(|(i, _)| *i != id);
                inner.responses.len() < before
            }
        }
    }

    pub fn remove_all<'a>(&self, subscriptions: impl IntoIterator<Item = &'a Subscription>) {
        for subscription in subscriptions {
            self.remove(subscription);
        }
    }

    pub fn len(&self) -> usize {
        let inner = self.lock();
        inner.received.len() + inner.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every received-listener. Returns how many ran.
    pub fn dispatch_received(&self, notification: &ReceivedNotification) -> usize {
        let listeners: Vec<ReceivedFn> = self
            .lock()
            .received
            .iter()
            .map(|(_, f)| Arc::clone(f))
            .collect();
        for listener in &listeners {
            listener(notification);
        }
        listeners.len()
    }

    /// Run every response-listener. Returns how many ran.
    pub fn dispatch_response(&self, response: &NotificationResponse) -> usize {
        let listeners: Vec<ResponseFn> = self
            .lock()
            .responses
            .iter()
            .map(|(_, f)| Arc::clone(f))
            .collect();
        for listener in &listeners {
            listener(response);
        }
        listeners.len()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ListenerRegistry")
            .field("received", &inner.received.len())
            .field("responses", &inner.responses.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn notification() -> ReceivedNotification {
        ReceivedNotification {
            title: "New Order".to_string(),
            body: "Order #1".to_string(),
            data: Value::Null,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn test_dispatch_and_remove() {
        let registry = ListenerRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let sub = registry.on_received(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(registry.dispatch_received(&notification()), 1);
        assert!(registry.remove(&sub));
        assert!(!registry.remove(&sub));
        assert_eq!(registry.dispatch_received(&notification()), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_kinds_are_separate() {
        let registry = ListenerRegistry::new();
        let received = registry.on_received(|_| {});
        let response = registry.on_response(|_| {});
        assert_eq!(registry.len(), 2);

        let tap = NotificationResponse {
            notification: notification(),
            action: "default".to_string(),
        };
        assert_eq!(registry.dispatch_response(&tap), 1);

        registry.remove_all([&received, &response]);
        assert!(registry.is_empty());
    }
}
