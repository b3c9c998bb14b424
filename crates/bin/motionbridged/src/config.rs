//! Configuration loading — TOML file with environment variable overrides.
//!
//! The file is required: it is the only place cameras are declared. Broker
//! and logging settings have defaults and can be overridden from the
//! environment. Everything is validated once, before anything connects.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use motionbridge_adapter_http_reqwest::HttpConfig;
use motionbridge_adapter_mqtt::MqttConfig;
use motionbridge_domain::camera::CameraDescriptor;
use motionbridge_domain::error::ValidationError;
use motionbridge_domain::registry::CameraRegistry;

/// Config file used when neither an argument nor `MOTIONBRIDGE_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "motionbridge.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Broker connection and topics.
    pub mqtt: MqttConfig,
    /// Camera HTTP client settings.
    pub http: HttpConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Cameras, in dispatch and publication order.
    pub cameras: Vec<CameraConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,rumqttc=warn".to_string(),
        }
    }
}

/// One `[[cameras]]` entry as written in the file.
///
/// Endpoints are optional here so a missing one is reported with the camera
/// name instead of a bare deserialization error. The camelCase aliases accept
/// camera tables written for the older JSON configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CameraConfig {
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(alias = "startDetection")]
    pub start_detection: Option<String>,
    #[serde(alias = "pauseDetection")]
    pub pause_detection: Option<String>,
    pub state: Option<String>,
    pub up: Option<String>,
    pub down: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub stop: Option<String>,
}

impl CameraConfig {
    fn to_descriptor(&self) -> Result<CameraDescriptor, ValidationError> {
        let mut builder = CameraDescriptor::builder()
            .base_url(self.url.clone())
            .up_url(self.up.clone())
            .down_url(self.down.clone())
            .left_url(self.left.clone())
            .right_url(self.right.clone())
            .stop_url(self.stop.clone());
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        if let Some(url) = &self.start_detection {
            builder = builder.start_detection_url(url.clone());
        }
        if let Some(url) = &self.pause_detection {
            builder = builder.pause_detection_url(url.clone());
        }
        if let Some(url) = &self.state {
            builder = builder.state_url(url.clone());
        }
        builder.build()
    }
}

impl Config {
    /// Load configuration from `path`, apply environment overrides and
    /// validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed, or
    /// if validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("MOTIONBRIDGE_BROKER_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Some(port) = var("MOTIONBRIDGE_BROKER_PORT").and_then(|val| val.parse().ok()) {
            self.mqtt.broker_port = port;
        }
        if let Some(val) = var("MOTIONBRIDGE_CLIENT_ID") {
            self.mqtt.client_id = val;
        }
        if let Some(val) = var("MOTIONBRIDGE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.mqtt.validate().map_err(ConfigError::Validation)?;
        self.registry()?;
        Ok(())
    }

    /// Build the camera registry, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Camera`] for the first camera with a missing
    /// name or required endpoint, or for a duplicated name.
    pub fn registry(&self) -> Result<CameraRegistry, ConfigError> {
        let cameras = self
            .cameras
            .iter()
            .map(CameraConfig::to_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CameraRegistry::new(cameras)?)
    }
}

/// Resolve the config path: command-line argument, then
/// `MOTIONBRIDGE_CONFIG`, then [`DEFAULT_CONFIG_PATH`].
#[must_use]
pub fn config_path(arg: Option<String>, env: Option<String>) -> PathBuf {
    arg.or(env)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[source] toml::de::Error),
    /// File I/O failure, including a missing file.
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Semantic validation failure outside the camera list.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A camera entry is invalid.
    #[error("invalid camera configuration")]
    Camera(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FULL: &str = r#"
        [mqtt]
        broker_host = "10.0.0.2"
        broker_port = 1884
        client_id = "cams"
        subscribe_topic = "home/motion/cmd"
        publish_topic = "home/motion/state"

        [http]
        timeout_secs = 4

        [logging]
        filter = "debug"

        [[cameras]]
        name = "1"
        url = "http://192.168.1.10:8080"
        start_detection = "http://192.168.1.10:8080/1/detection/start"
        pause_detection = "http://192.168.1.10:8080/1/detection/pause"
        state = "http://192.168.1.10:8080/1/detection/status"
        up = "http://192.168.1.10/ptz/up"
        down = "http://192.168.1.10/ptz/down"
        left = "http://192.168.1.10/ptz/left"
        right = "http://192.168.1.10/ptz/right"
        stop = "http://192.168.1.10/ptz/stop"

        [[cameras]]
        name = "2"
        url = "http://192.168.1.10:8080"
        start_detection = "http://192.168.1.10:8080/2/detection/start"
        pause_detection = "http://192.168.1.10:8080/2/detection/pause"
        state = "http://192.168.1.10:8080/2/detection/status"
    "#;

    #[test]
    fn should_parse_full_toml() {
        let config: Config = toml::from_str(FULL).unwrap();
        assert_eq!(config.mqtt.broker_host, "10.0.0.2");
        assert_eq!(config.mqtt.broker_port, 1884);
        assert_eq!(config.mqtt.subscribe_topic, "home/motion/cmd");
        assert_eq!(config.mqtt.publish_topic, "home/motion/state");
        assert_eq!(config.http.timeout_secs, Some(4));
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.cameras.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_build_registry_in_file_order() {
        let config: Config = toml::from_str(FULL).unwrap();
        let registry = config.registry().unwrap();
        let names: Vec<_> = registry.iter().map(CameraDescriptor::name).collect();
        assert_eq!(names, vec!["1", "2"]);
        assert!(registry.find("1").unwrap().has_pan_tilt());
        assert!(!registry.find("2").unwrap().has_pan_tilt());
    }

    #[test]
    fn should_accept_camel_case_camera_keys() {
        let toml = r#"
            [[cameras]]
            name = "porch"
            startDetection = "http://cam/start"
            pauseDetection = "http://cam/pause"
            state = "http://cam/state"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let registry = config.registry().unwrap();
        assert_eq!(
            registry.find("porch").unwrap().start_detection_url(),
            "http://cam/start"
        );
    }

    #[test]
    fn should_reject_camera_without_state_endpoint() {
        let toml = r#"
            [[cameras]]
            name = "garage"
            start_detection = "http://cam/start"
            pause_detection = "http://cam/pause"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Camera(ValidationError::MissingEndpoint {
                field: "state",
                ..
            }))
        ));
    }

    #[test]
    fn should_reject_camera_without_name() {
        let toml = r#"
            [[cameras]]
            start_detection = "http://cam/start"
            pause_detection = "http://cam/pause"
            state = "http://cam/state"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Camera(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_duplicate_camera_names() {
        let toml = r#"
            [[cameras]]
            name = "1"
            start_detection = "a"
            pause_detection = "b"
            state = "c"

            [[cameras]]
            name = "1"
            start_detection = "d"
            pause_detection = "e"
            state = "f"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Camera(ValidationError::DuplicateCamera(_)))
        ));
    }

    #[test]
    fn should_reject_wildcard_publish_topic() {
        let toml = r#"
            [mqtt]
            publish_topic = "motion/#"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_fail_when_file_missing() {
        let result = Config::from_file(Path::new("definitely-not-here.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MOTIONBRIDGE_BROKER_HOST", "broker.lan"),
            ("MOTIONBRIDGE_BROKER_PORT", "2883"),
            ("MOTIONBRIDGE_CLIENT_ID", "bridge-2"),
            ("MOTIONBRIDGE_LOG", "warn"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.mqtt.broker_host, "broker.lan");
        assert_eq!(config.mqtt.broker_port, 2883);
        assert_eq!(config.mqtt.client_id, "bridge-2");
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_prefer_rust_log_over_motionbridge_log() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "MOTIONBRIDGE_LOG" => Some("warn".to_string()),
            "RUST_LOG" => Some("trace".to_string()),
            _ => None,
        });
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparseable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == "MOTIONBRIDGE_BROKER_PORT").then(|| "abc".to_string())
        });
        assert_eq!(config.mqtt.broker_port, 1883);
    }

    #[test]
    fn should_resolve_config_path_with_argument_first() {
        assert_eq!(
            config_path(Some("a.toml".to_string()), Some("b.toml".to_string())),
            PathBuf::from("a.toml")
        );
        assert_eq!(
            config_path(None, Some("b.toml".to_string())),
            PathBuf::from("b.toml")
        );
        assert_eq!(config_path(None, None), PathBuf::from(DEFAULT_CONFIG_PATH));
    }
}
