//! Notification service settings.

use crate::platform::AndroidChannel;
use serde::{Deserialize, Serialize};

/// Push send endpoint.
pub const PUSH_ENDPOINT: &str = "https://exp.host/--/api/v2/push/send";

/// Settings for a [`NotificationService`](crate::NotificationService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub endpoint: String,
    /// Push project the device token is issued for.
    pub project_id: Option<String>,
    /// Shown in the test notification body.
    pub app_name: String,
    pub android_channel: AndroidChannel,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            endpoint: PUSH_ENDPOINT.to_string(),
            project_id: None,
            app_name: "Silver POS".to_string(),
            android_channel: AndroidChannel::default(),
        }
    }
}

impl NotifyConfig {
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}
