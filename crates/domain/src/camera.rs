//! Camera — a motion-detection camera reachable over plain HTTP GETs.
//!
//! A camera exposes three required control endpoints (start detection,
//! pause detection, state page) and up to five pan/tilt endpoints. Pan/tilt
//! is an all-or-nothing capability: [`CameraDescriptor::has_pan_tilt`] is only
//! `true` when every movement endpoint is configured.

use crate::command::Command;
use crate::error::ValidationError;

/// Identity and capability record for one camera.
///
/// Built once from configuration through [`CameraDescriptor::builder`] and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDescriptor {
    name: String,
    base_url: Option<String>,
    start_detection_url: String,
    pause_detection_url: String,
    state_url: String,
    up_url: Option<String>,
    down_url: Option<String>,
    left_url: Option<String>,
    right_url: Option<String>,
    stop_url: Option<String>,
    has_pan_tilt: bool,
}

impl CameraDescriptor {
    /// Start building a new descriptor.
    #[must_use]
    pub fn builder() -> CameraDescriptorBuilder {
        CameraDescriptorBuilder::default()
    }

    /// Dispatch key matched against the `camera` field of inbound commands.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Informational base URL of the camera (not used for dispatch).
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    #[must_use]
    pub fn start_detection_url(&self) -> &str {
        &self.start_detection_url
    }

    #[must_use]
    pub fn pause_detection_url(&self) -> &str {
        &self.pause_detection_url
    }

    /// URL of the plain-text state page.
    #[must_use]
    pub fn state_url(&self) -> &str {
        &self.state_url
    }

    /// Whether all five pan/tilt endpoints are configured.
    #[must_use]
    pub fn has_pan_tilt(&self) -> bool {
        self.has_pan_tilt
    }

    /// Endpoint invoked for `command`, if this camera has one.
    ///
    /// [`Command::GetState`] maps to the state page. Movement commands return
    /// `None` when the corresponding endpoint is not configured.
    #[must_use]
    pub fn endpoint(&self, command: Command) -> Option<&str> {
        match command {
            Command::StartDetection => Some(&self.start_detection_url),
            Command::PauseDetection => Some(&self.pause_detection_url),
            Command::GetState => Some(&self.state_url),
            Command::Up => self.up_url.as_deref(),
            Command::Down => self.down_url.as_deref(),
            Command::Left => self.left_url.as_deref(),
            Command::Right => self.right_url.as_deref(),
            Command::Stop => self.stop_url.as_deref(),
        }
    }
}

/// Builder for [`CameraDescriptor`].
///
/// Required fields: `name`, `start_detection_url`, `pause_detection_url`,
/// `state_url`.
#[derive(Debug, Default)]
pub struct CameraDescriptorBuilder {
    name: Option<String>,
    base_url: Option<String>,
    start_detection_url: Option<String>,
    pause_detection_url: Option<String>,
    state_url: Option<String>,
    up_url: Option<String>,
    down_url: Option<String>,
    left_url: Option<String>,
    right_url: Option<String>,
    stop_url: Option<String>,
}

macro_rules! optional_setters {
    ($($field:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $field(mut self, value: Option<impl Into<String>>) -> Self {
                self.$field = value.map(Into::into);
                self
            }
        )*
    };
}

impl CameraDescriptorBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn start_detection_url(mut self, url: impl Into<String>) -> Self {
        self.start_detection_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn pause_detection_url(mut self, url: impl Into<String>) -> Self {
        self.pause_detection_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn state_url(mut self, url: impl Into<String>) -> Self {
        self.state_url = Some(url.into());
        self
    }

    optional_setters!(base_url, up_url, down_url, left_url, right_url, stop_url);

    /// Validate required fields and produce the descriptor.
    ///
    /// Empty strings count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if no name was given, or
    /// [`ValidationError::MissingEndpoint`] naming the first missing
    /// required endpoint.
    pub fn build(self) -> Result<CameraDescriptor, ValidationError> {
        let name = non_empty(self.name)
            .filter(|name| !name.trim().is_empty())
            .ok_or(ValidationError::EmptyName)?;

        let require = |value: Option<String>, field: &'static str| {
            non_empty(value).ok_or_else(|| ValidationError::MissingEndpoint {
                camera: name.clone(),
                field,
            })
        };
        let start_detection_url = require(self.start_detection_url, "start_detection")?;
        let pause_detection_url = require(self.pause_detection_url, "pause_detection")?;
        let state_url = require(self.state_url, "state")?;

        let up_url = non_empty(self.up_url);
        let down_url = non_empty(self.down_url);
        let left_url = non_empty(self.left_url);
        let right_url = non_empty(self.right_url);
        let stop_url = non_empty(self.stop_url);
        let has_pan_tilt = [&up_url, &down_url, &left_url, &right_url, &stop_url]
            .iter()
            .all(|url| url.is_some());

        Ok(CameraDescriptor {
            name,
            base_url: non_empty(self.base_url),
            start_detection_url,
            pause_detection_url,
            state_url,
            up_url,
            down_url,
            left_url,
            right_url,
            stop_url,
            has_pan_tilt,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
