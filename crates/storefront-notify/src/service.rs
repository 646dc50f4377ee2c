//! Push registration and delivery.

use crate::config::NotifyConfig;
use crate::http::{HttpRequest, HttpTransport};
use crate::listeners::{ListenerRegistry, NotificationResponse, ReceivedNotification, Subscription};
use crate::message::{OrderAlert, PushMessage, StockAlert};
use crate::platform::{PermissionStatus, Platform, PushPlatform};
use crate::NotifyError;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info, warn};

/// Registers the device for push and sends messages through the push
/// endpoint.
///
/// Built explicitly with its transport and platform; hold one per app and
/// share it by reference.
pub struct NotificationService<T, P> {
    transport: T,
    platform: P,
    config: NotifyConfig,
    token: Option<String>,
    listeners: ListenerRegistry,
}

impl<T: HttpTransport, P: PushPlatform> NotificationService<T, P> {
    pub fn new(transport: T, platform: P, config: NotifyConfig) -> Self {
        Self {
            transport,
            platform,
            config,
            token: None,
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Token from the last successful registration.
    pub fn push_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Adopt a token obtained elsewhere, e.g. one stored server-side.
    pub fn use_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Register this device and remember its push token.
    ///
    /// On Android the notification channel is created first. Fails off
    /// device, when permission is refused, or without a project id.
    pub fn register(&mut self) -> Result<String, NotifyError> {
        match self.try_register() {
            Ok(token) => {
                info!(token = %token, "registered for push notifications");
                self.token = Some(token.clone());
                Ok(token)
            }
            Err(e) => {
                error!(error = %e, "error registering for push notifications");
                Err(e)
            }
        }
    }

    fn try_register(&self) -> Result<String, NotifyError> {
        if self.platform.os() == Platform::Android {
            self.platform
                .set_notification_channel(&self.config.android_channel)?;
        }

        if !self.platform.is_physical_device() {
            return Err(NotifyError::NotPhysicalDevice);
        }

        let mut status = self.platform.permission_status()?;
        if status != PermissionStatus::Granted {
            status = self.platform.request_permission()?;
        }
        if status != PermissionStatus::Granted {
            return Err(NotifyError::PermissionDenied);
        }

        let project_id = self
            .config
            .project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(NotifyError::MissingProjectId)?;

        self.platform.push_token(project_id)
    }

    /// POST `message` to the push endpoint. Returns the endpoint's JSON
    /// reply, or `Null` for an empty body.
    pub fn send(&self, message: &PushMessage) -> Result<Value, NotifyError> {
        let request = HttpRequest::post(&self.config.endpoint)
            .header("Accept", "application/json")
            .header("Accept-Encoding", "gzip, deflate")
            .json(&message.to_wire())?;

        let result = self
            .transport
            .send(request)
            .and_then(|response| response.error_for_status())
            .and_then(|response| {
                if response.body.iter().all(u8::is_ascii_whitespace) {
                    Ok(Value::Null)
                } else {
                    response.json()
                }
            });

        match &result {
            Ok(reply) => info!(title = %message.title, reply = %reply, "notification sent"),
            Err(e) => warn!(title = %message.title, error = %e, "error sending push notification"),
        }
        result
    }

    fn registered_token(&self) -> Result<&str, NotifyError> {
        self.token.as_deref().ok_or(NotifyError::NoToken)
    }

    /// Send a test notification to this device.
    pub fn send_test(&self) -> Result<Value, NotifyError> {
        let message = PushMessage::new(
            self.registered_token()?,
            "Test Notification",
            format!("This is a test notification from {}!", self.config.app_name),
        )
        .with_data(json!({
            "type": "test",
            "timestamp": Utc::now().to_rfc3339(),
        }));
        self.send(&message)
    }

    pub fn send_order(&self, alert: OrderAlert) -> Result<Value, NotifyError> {
        let message = alert.into_message(self.registered_token()?);
        self.send(&message)
    }

    pub fn send_inventory(&self, alert: StockAlert) -> Result<Value, NotifyError> {
        let message = alert.into_message(self.registered_token()?);
        self.send(&message)
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn add_received_listener(
        &self,
        listener: impl Fn(&ReceivedNotification) + Send + Sync + 'static,
    ) -> Subscription {
        self.listeners.on_received(listener)
    }

    /// Listen for taps on notifications.
    pub fn add_response_listener(
        &self,
        listener: impl Fn(&NotificationResponse) + Send + Sync + 'static,
    ) -> Subscription {
        self.listeners.on_response(listener)
    }

    pub fn remove_listeners(&self, subscriptions: &[Subscription]) {
        self.listeners.remove_all(subscriptions);
    }

    /// Hand a notification that reached the device to the listeners.
    pub fn deliver(&self, notification: &ReceivedNotification) {
        info!(title = %notification.title, "notification received");
        self.listeners.dispatch_received(notification);
    }

    pub fn deliver_response(&self, response: &NotificationResponse) {
        info!(title = %response.notification.title, action = %response.action, "notification response");
        self.listeners.dispatch_response(response);
    }
}
