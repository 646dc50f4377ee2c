//! Device platform seam: OS, permissions, channels and push tokens.

use std::sync::Arc;

use crate::NotifyError;
use serde::{Deserialize, Serialize};

/// Operating system the app runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
}

/// Notification permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Android notification channel importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Min,
    Low,
    Default,
    High,
    Max,
}

/// Android notification channel. Android drops notifications posted to a
/// channel that was never created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidChannel {
    pub id: String,
    pub name: String,
    pub importance: Importance,
    /// Alternating off/on durations in milliseconds.
    pub vibration_pattern: Vec<u64>,
    /// LED color as `#rrggbb`.
    pub light_color: String,
}

impl Default for AndroidChannel {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            name: "default".to_string(),
            importance: Importance::Max,
            vibration_pattern: vec![0, 250, 250, 250],
            light_color: "#378388".to_string(),
        }
    }
}

/// What the notification service needs from the device.
pub trait PushPlatform {
    fn os(&self) -> Platform;

    /// Emulators and simulators cannot receive push tokens.
    fn is_physical_device(&self) -> bool;

    fn set_notification_channel(&self, channel: &AndroidChannel) -> Result<(), NotifyError>;

    fn permission_status(&self) -> Result<PermissionStatus, NotifyError>;

    /// Prompt the user. Returns the status after the prompt.
    fn request_permission(&self) -> Result<PermissionStatus, NotifyError>;

    /// Fetch the push token for `project_id`.
    fn push_token(&self, project_id: &str) -> Result<String, NotifyError>;
}

impl<P: PushPlatform + ?Sized> PushPlatform for Arc<P> {
    fn os(&self) -> Platform {
        (**self).os()
    }

    fn is_physical_device(&self) -> bool {
        (**self).is_physical_device()
    }

    fn set_notification_channel(&self, channel: &AndroidChannel) -> Result<(), NotifyError> {
        (**self).set_notification_channel(channel)
    }

    fn permission_status(&self) -> Result<PermissionStatus, NotifyError> {
        (**self).permission_status()
    }

    fn request_permission(&self) -> Result<PermissionStatus, NotifyError> {
        (**self).request_permission()
    }

    fn push_token(&self, project_id: &str) -> Result<String, NotifyError> {
        (**self).push_token(project_id)
    }
}

/// Platform for processes with no device, such as a back-office sender
/// that already knows the recipient tokens. Registration always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessPlatform;

impl PushPlatform for HeadlessPlatform {
    fn os(&self) -> Platform {
        Platform::Web
    }

    fn is_physical_device(&self) -> bool {
        false
    }

    fn set_notification_channel(&self, _channel: &AndroidChannel) -> Result<(), NotifyError> {
        Ok(())
    }

    fn permission_status(&self) -> Result<PermissionStatus, NotifyError> {
        Ok(PermissionStatus::Denied)
    }

    fn request_permission(&self) -> Result<PermissionStatus, NotifyError> {
        Ok(PermissionStatus::Denied)
    }

    fn push_token(&self, _project_id: &str) -> Result<String, NotifyError> {
        Err(NotifyError::NotPhysicalDevice)
    }
}
