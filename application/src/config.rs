//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Origins of the collaborating services.
    pub origins: Origins,

    /// Session configuration.
    pub session: Session,

    /// Notifications configuration.
    pub notifications: Notifications,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Origins of the collaborating services.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Origins {
    /// Origin of the content API.
    #[default("http://localhost:8002/api".to_owned())]
    pub api: String,

    /// Origin of the external authentication service.
    #[default("http://localhost:8001".to_owned())]
    pub auth: String,

    /// Origin of this application.
    #[default("http://localhost:3000".to_owned())]
    pub app: String,
}

impl Origins {
    /// Parses these [`Origins`] into a [`client::Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if any of the origins is not a valid URL.
    pub fn parse(&self) -> Result<client::Config, url::ParseError> {
        Ok(client::Config {
            api_origin: self.api.parse()?,
            auth_origin: self.auth.parse()?,
            app_origin: self.app.parse()?,
        })
    }
}

/// Session configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Session {
    /// Time-to-live of an established session.
    #[default(time::Duration::from_secs(90 * 60))]
    #[serde(with = "humantime_serde")]
    pub ttl: time::Duration,
}

/// Notifications configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Notifications {
    /// Delay after which a transient notification dismisses itself.
    #[default(time::Duration::from_secs(3))]
    #[serde(with = "humantime_serde")]
    pub dismiss_after: time::Duration,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Config;

    #[test]
    fn defaults_mirror_local_development_setup() {
        let config = Config::default();

        let parsed = config.origins.parse().unwrap();
        assert_eq!(
            parsed.api_origin.as_str(),
            "http://localhost:8002/api",
        );
        assert_eq!(parsed.auth_origin.as_str(), "http://localhost:8001/");
        assert_eq!(parsed.app_origin.as_str(), "http://localhost:3000/");

        assert_eq!(config.session.ttl.as_secs(), 90 * 60);
        assert_eq!(config.notifications.dismiss_after.as_secs(), 3);
    }
}
