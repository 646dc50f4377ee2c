//! HTTP seam for the push service.
//!
//! [`NotificationService`](crate::NotificationService) never talks to the
//! network directly; it hands an [`HttpRequest`] to whatever
//! [`HttpTransport`] it was built with. Enable the `http-client` feature for
//! a blocking `reqwest` transport.

mod request;
mod response;
#[cfg(feature = "http-client")]
mod transport;

pub use request::{HttpRequest, Method};
pub use response::HttpResponse;
#[cfg(feature = "http-client")]
pub use transport::ReqwestTransport;

use std::sync::Arc;

use crate::NotifyError;

/// Sends one request and returns the full response.
///
/// Non-2xx statuses are returned as responses, not errors; callers decide
/// with [`HttpResponse::error_for_status`].
pub trait HttpTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, NotifyError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, NotifyError> {
        (**self).send(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, NotifyError> {
        (**self).send(request)
    }
}
