//!
//! Logger-specific config.
//!

use std::path::PathBuf;

use error_stack::ResultExt;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::env::{self, Env};

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "PAYMENTS_SDK";

/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Errors raised while loading settings or setting up the logger.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// The layered configuration could not be built or deserialized.
    #[error("Failed to load the configuration")]
    ConfigLoad,
    /// The selected API base URL could not be parsed.
    #[error("Invalid API base URL")]
    InvalidBaseUrl,
    /// A global tracing subscriber could not be installed.
    #[error("Failed to set up the logger")]
    LoggerSetup,
}

/// Config settings.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Logging to a console.
    pub log: Log,
    /// API endpoint selection.
    pub api: Api,
}

/// Log config settings.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Log {
    /// Logging to a console.
    pub console: LogConsole,
}

/// Logging to a console.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConsole {
    /// Whether you want to see log in your terminal.
    pub enabled: bool,
    /// What you see in your terminal.
    pub level: LogLevel,
    /// Log format
    pub log_format: LogFormat,
}

impl Default for LogConsole {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
            log_format: LogFormat::Default,
        }
    }
}

/// Describes the level of verbosity of a span or event.
///
/// Parsed case-insensitively, so `debug`, `Debug` and `DEBUG` are the same level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::EnumString)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    /// Everything, including the lowest priority information.
    Trace,
    /// Lower priority information.
    Debug,
    /// Useful information.
    #[default]
    Info,
    /// Hazardous situations.
    Warn,
    /// Very serious errors.
    Error,
    /// Nothing at all.
    Off,
}

impl TryFrom<String> for LogLevel {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, <Self as TryFrom<String>>::Error> {
        value.parse()
    }
}

impl LogLevel {
    /// Returns the most verbose [`LevelFilter`] this level lets through.
    pub fn into_level(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::Off => LevelFilter::OFF,
        }
    }
}

/// Telemetry / tracing.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Default pretty log format
    #[default]
    Default,
    /// JSON based structured logging
    Json,
}

/// API environments the SDK can target.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApiEnvironment {
    /// Test mode, no money moves.
    #[default]
    Sandbox,
    /// Live mode.
    Production,
}

/// API endpoint selection.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Api {
    /// Which environment requests target.
    pub environment: ApiEnvironment,
    /// Base URL of the sandbox environment.
    pub sandbox_url: String,
    /// Base URL of the production environment.
    pub production_url: String,
    /// Explicit base URL, taking precedence over the environment.
    pub base_url: Option<String>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            environment: ApiEnvironment::Sandbox,
            sandbox_url: String::from("https://test.payments.example.com"),
            production_url: String::from("https://live.payments.example.com"),
            base_url: None,
        }
    }
}

impl Api {
    /// The base URL requests are built against.
    pub fn base_url(&self) -> error_stack::Result<Url, EnvError> {
        let raw = match (&self.base_url, self.environment) {
            (Some(base_url), _) => base_url,
            (None, ApiEnvironment::Sandbox) => &self.sandbox_url,
            (None, ApiEnvironment::Production) => &self.production_url,
        };

        Url::parse(raw)
            .change_context(EnvError::InvalidBaseUrl)
            .attach_printable_lazy(|| format!("Unable to parse {raw:?} as a URL"))
    }
}

impl Config {
    /// Default constructor.
    pub fn new() -> error_stack::Result<Self, EnvError> {
        Self::new_with_config_path(None)
    }

    /// Constructor expecting config path set explicitly.
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> error_stack::Result<Self, EnvError> {
        let environment = env::which();
        let config_path = Self::config_path(environment, explicit_config_path);

        ::config::Config::builder()
            .add_source(::config::File::from(config_path.clone()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .separator(ENV_SEPARATOR),
            )
            .build()
            .and_then(|config| config.try_deserialize())
            .change_context(EnvError::ConfigLoad)
            .attach_printable_lazy(|| {
                format!(
                    "Unable to load {environment} settings from {}",
                    config_path.display()
                )
            })
    }

    /// Config path.
    pub fn config_path(environment: Env, explicit_config_path: Option<PathBuf>) -> PathBuf {
        explicit_config_path.unwrap_or_else(|| {
            env::workspace_path()
                .join("config")
                .join(environment.config_file_name())
        })
    }

    /// The base URL requests are built against.
    pub fn base_url(&self) -> error_stack::Result<Url, EnvError> {
        self.api.base_url()
    }
}
