//! Push notifications for the storefront.
//!
//! [`NotificationService`] registers the device for push, remembers its
//! token and sends messages through the push endpoint. It is built
//! explicitly from an [`HttpTransport`] and a [`PushPlatform`], so tests and
//! back-office tools can swap either side.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_notify::prelude::*;
//!
//! let transport = ReqwestTransport::new()?;
//! let mut service = NotificationService::new(transport, device, NotifyConfig::default()
//!     .with_project_id("my-project"));
//! service.register()?;
//! service.send_test()?;
//! ```

mod center;
mod config;
mod error;
pub mod http;
mod listeners;
mod message;
mod platform;
mod service;

pub use center::{NotificationCenter, NotificationState};
pub use config::{NotifyConfig, PUSH_ENDPOINT};
pub use error::NotifyError;
pub use listeners::{
    ListenerRegistry, NotificationResponse, ReceivedNotification, Subscription,
};
pub use message::{OrderAlert, PushMessage, StockAlert};
pub use platform::{
    AndroidChannel, HeadlessPlatform, Importance, PermissionStatus, Platform, PushPlatform,
};
pub use service::NotificationService;

/// Prelude for convenient imports.
pub mod prelude {
    #[cfg(feature = "http-client")]
    pub use crate::http::ReqwestTransport;
    pub use crate::http::{HttpRequest, HttpResponse, HttpTransport};
    pub use crate::{
        NotificationCenter, NotificationService, NotifyConfig, NotifyError, OrderAlert,
        PushMessage, PushPlatform, StockAlert,
    };
}
