//! Commands accepted over the bus and their wire decoding.
//!
//! An inbound payload is a UTF-8 JSON object:
//!
//! ```json
//! { "cmd": "startDetection", "camera": "1" }
//! ```

use std::str::FromStr;

/// Closed set of commands the bridge understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    StartDetection,
    PauseDetection,
    GetState,
    Up,
    Down,
    Left,
    Right,
    Stop,
}

impl Command {
    /// Every command, in wire-documentation order.
    pub const ALL: [Self; 8] = [
        Self::StartDetection,
        Self::PauseDetection,
        Self::GetState,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Stop,
    ];

    /// Wire name of the command.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartDetection => "startDetection",
            Self::PauseDetection => "pauseDetection",
            Self::GetState => "getState",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Stop => "stop",
        }
    }

    /// Whether the command calls an actuation endpoint on the camera.
    ///
    /// Only [`GetState`](Self::GetState) is a pure query.
    #[must_use]
    pub fn actuates(self) -> bool {
        !matches!(self, Self::GetState)
    }

    /// Whether the camera state is republished after the command.
    ///
    /// Movement does not change detection state, so pan/tilt commands never
    /// republish.
    #[must_use]
    pub fn republishes_state(self) -> bool {
        matches!(
            self,
            Self::StartDetection | Self::PauseDetection | Self::GetState
        )
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| CommandError::UnknownCommand(s.to_string()))
    }
}

/// A decoded inbound command, alive for the duration of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    pub cmd: Command,
    pub camera: String,
}

impl InboundCommand {
    /// Decode a raw bus payload.
    ///
    /// # Errors
    ///
    /// - [`CommandError::InvalidUtf8`] if the payload is not UTF-8
    /// - [`CommandError::InvalidJson`] if it is not a JSON document
    /// - [`CommandError::MalformedField`] if `cmd` or `camera` is absent or
    ///   not a string
    /// - [`CommandError::UnknownCommand`] if `cmd` is not a known command
    pub fn parse(payload: &[u8]) -> Result<Self, CommandError> {
        let text = std::str::from_utf8(payload).map_err(CommandError::InvalidUtf8)?;
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(CommandError::InvalidJson)?;

        let cmd = string_field(&value, "cmd")?;
        let camera = string_field(&value, "camera")?;
        let cmd = cmd.parse()?;

        Ok(Self {
            cmd,
            camera: camera.to_string(),
        })
    }
}

fn string_field<'a>(
    value: &'a serde_json::Value,
    field: &'static str,
) -> Result<&'a str, CommandError> {
    value
        .get(field)
        .and_then(serde_json::Value::as_str)
        .ok_or(CommandError::MalformedField(field))
}

/// Why an inbound payload could not be turned into an [`InboundCommand`].
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The payload bytes are not valid UTF-8.
    #[error("payload is not valid UTF-8")]
    InvalidUtf8(#[source] std::str::Utf8Error),

    /// The payload text is not valid JSON.
    #[error("payload is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// A required field is missing or is not a string.
    #[error("field {0:?} is missing or not a string")]
    MalformedField(&'static str),

    /// `cmd` names a command the bridge does not know.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}
