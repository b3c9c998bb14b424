//! Device gateway — issues control and state requests to camera endpoints.

use motionbridge_domain::status::DeviceStatus;

use crate::ports::HttpFetcher;

/// Talks to cameras through an [`HttpFetcher`] and absorbs every transport
/// failure.
///
/// Nothing returned from here is an error: actuation is best-effort and a
/// failed state query is simply [`DeviceStatus::Unavailable`].
pub struct DeviceGateway<H> {
    http: H,
}

impl<H: HttpFetcher> DeviceGateway<H> {
    /// Create a new gateway backed by the given HTTP client.
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Fire-and-forget GET against an actuation endpoint.
    ///
    /// Failures are logged and dropped; there is no retry.
    pub async fn invoke(&self, url: &str) {
        match self.http.get(url).await {
            Ok(_) => tracing::debug!(%url, "camera endpoint invoked"),
            Err(err) => tracing::warn!(%err, %url, "camera endpoint call failed"),
        }
    }

    /// GET the state page and classify it.
    ///
    /// See [`DeviceStatus::from_state_page`] for the classification contract.
    pub async fn query_state(&self, url: &str) -> DeviceStatus {
        match self.http.get(url).await {
            Ok(body) => {
                tracing::debug!(%url, %body, "camera state page");
                DeviceStatus::from_state_page(&body)
            }
            Err(err) => {
                tracing::warn!(%err, %url, "camera state query failed");
                DeviceStatus::Unavailable
            }
        }
    }
}
