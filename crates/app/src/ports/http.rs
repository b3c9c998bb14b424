//! HTTP port — the only way the core talks to cameras.

use std::future::Future;

use motionbridge_domain::error::MotionBridgeError;

/// Performs a single HTTP GET and returns the response body as text.
///
/// Implementations must report connection failures, timeouts, and non-2xx
/// responses as errors. They must not retry.
pub trait HttpFetcher {
    /// GET `url` and return the body.
    fn get(&self, url: &str) -> impl Future<Output = Result<String, MotionBridgeError>> + Send;
}

impl<T: HttpFetcher + Send + Sync> HttpFetcher for std::sync::Arc<T> {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, MotionBridgeError>> + Send {
        (**self).get(url)
    }
}
