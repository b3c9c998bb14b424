//! Device status and bridge availability.

use serde::Serialize;

/// Marker the camera's plain-text state page contains while detection runs.
pub const ACTIVE_MARKER: &str = "status ACTIVE";

/// Observed detection state of one camera.
///
/// [`Unavailable`](Self::Unavailable) is reported both when the camera says so
/// and when it could not be reached at all; the two cases are not
/// distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceStatus {
    Active,
    Paused,
    #[default]
    Unavailable,
}

impl DeviceStatus {
    /// Classify a successfully fetched state page.
    ///
    /// The page is `Active` iff it contains [`ACTIVE_MARKER`] (case-sensitive
    /// substring), otherwise `Paused`. A failed fetch never reaches this
    /// function and maps to `Unavailable` at the caller.
    #[must_use]
    pub fn from_state_page(body: &str) -> Self {
        if body.contains(ACTIVE_MARKER) {
            Self::Active
        } else {
            Self::Paused
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide liveness of the bridge itself, as seen by bus subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BridgeAvailability {
    Available,
    Unavailable,
}
