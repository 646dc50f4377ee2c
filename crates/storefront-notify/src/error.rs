//! Notification error types.

use thiserror::Error;

/// Errors raised while registering for or delivering push notifications.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Push tokens are only issued to real devices.
    #[error("Must use physical device for push notifications")]
    NotPhysicalDevice,

    /// The user declined the notification permission.
    #[error("Permission not granted to get push token for push notification")]
    PermissionDenied,

    /// No push project configured.
    #[error("Project ID not found")]
    MissingProjectId,

    /// A send was attempted before registration produced a token.
    #[error("No push token available. Please register for notifications first.")]
    NoToken,

    /// Device platform call failed.
    #[error("Platform error: {0}")]
    Platform(String),

    /// Failed to send the request.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Push endpoint answered with a non-2xx status.
    #[error("Failed to send notification: HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for NotifyError {
    fn from(e: serde_json::Error) -> Self {
        NotifyError::Json(e.to_string())
    }
}
