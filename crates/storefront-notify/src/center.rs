//! Observable notification state for a screen or app shell.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::http::HttpTransport;
use crate::listeners::{ReceivedNotification, Subscription};
use crate::message::{OrderAlert, StockAlert};
use crate::platform::PushPlatform;
use crate::service::NotificationService;
use crate::NotifyError;
use serde::Serialize;

/// Snapshot of the notification state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationState {
    pub push_token: Option<String>,
    /// Most recent notification received while mounted.
    pub notification: Option<ReceivedNotification>,
    pub is_registering: bool,
    /// Message of the last failed operation.
    pub error: Option<String>,
}

/// Wraps a [`NotificationService`], records failures as state instead of
/// returning them, and tracks the latest received notification.
///
/// Dropping the center removes its listener from the service.
pub struct NotificationCenter<'s, T: HttpTransport, P: PushPlatform> {
    service: &'s mut NotificationService<T, P>,
    state: Arc<Mutex<NotificationState>>,
    subscription: Subscription,
}

impl<'s, T: HttpTransport, P: PushPlatform> NotificationCenter<'s, T, P> {
    pub fn new(service: &'s mut NotificationService<T, P>) -> Self {
        let state = Arc::new(Mutex::new(NotificationState {
            push_token: service.push_token().map(str::to_string),
            ..NotificationState::default()
        }));
        let sink = Arc::clone(&state);
        let subscription = service.add_received_listener(move |notification| {
            lock(&sink).notification = Some(notification.clone());
        });
        Self {
            service,
            state,
            subscription,
        }
    }

    /// Create the center and register right away.
    pub fn start(service: &'s mut NotificationService<T, P>) -> Self {
        let mut center = Self::new(service);
        center.register();
        center
    }

    pub fn state(&self) -> NotificationState {
        lock(&self.state).clone()
    }

    pub fn service(&self) -> &NotificationService<T, P> {
        &*self.service
    }

    pub fn register(&mut self) {
        {
            let mut state = lock(&self.state);
            state.is_registering = true;
            state.error = None;
        }
        let result = self.service.register();
        let mut state = lock(&self.state);
        state.is_registering = false;
        match result {
            Ok(token) => state.push_token = Some(token),
            Err(e) => state.error = Some(e.to_string()),
        }
    }

    pub fn send_test(&self) {
        self.capture(|service| service.send_test());
    }

    pub fn send_order(&self, alert: OrderAlert) {
        self.capture(|service| service.send_order(alert));
    }

    pub fn send_inventory(&self, alert: StockAlert) {
        self.capture(|service| service.send_inventory(alert));
    }

    pub fn clear_error(&self) {
        lock(&self.state).error = None;
    }

    fn capture<R>(&self, op: impl FnOnce(&NotificationService<T, P>) -> Result<R, NotifyError>) {
        lock(&self.state).error = None;
        if let Err(e) = op(&*self.service) {
            lock(&self.state).error = Some(e.to_string());
        }
    }
}

impl<T: HttpTransport, P: PushPlatform> Drop for NotificationCenter<'_, T, P> {
    fn drop(&mut self) {
        self.service.remove_listeners(std::slice::from_ref(&self.subscription));
    }
}

fn lock(state: &Mutex<NotificationState>) -> MutexGuard<'_, NotificationState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
