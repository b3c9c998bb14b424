//! # motionbridge-adapter-http-reqwest
//!
//! HTTP adapter — implements the [`HttpFetcher`] port with `reqwest`.
//!
//! Cameras expose a plain-HTTP control API: every action is a GET and the
//! state page is a short text body. This adapter performs exactly one GET per
//! call and treats connection failures, timeouts and non-2xx responses as
//! errors. It never retries.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `motionbridge-app` and
//! `motionbridge-domain`.

mod config;
mod error;

pub use config::HttpConfig;
pub use error::HttpError;

use std::time::Duration;

use motionbridge_app::ports::HttpFetcher;
use motionbridge_domain::error::MotionBridgeError;

/// [`HttpFetcher`] backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Build a fetcher from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend cannot be initialised.
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(HttpError::Build)?;
        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> Result<String, HttpError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HttpError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| HttpError::Body {
            url: url.to_string(),
            source,
        })
    }
}

impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<String, MotionBridgeError> {
        Ok(self.fetch(url).await?)
    }
}
