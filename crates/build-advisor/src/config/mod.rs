use crate::engine::{StageKind, UnknownStageKind};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            engine: EngineConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Default scoring pipeline and request handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub stages: Vec<StageKind>,
    pub exclude_owned_items: bool,
    pub result_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stages: StageKind::DEFAULT_PIPELINE.to_vec(),
            exclude_owned_items: true,
            result_limit: None,
        }
    }
}

impl EngineConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let stages = match env::var("APP_ENGINE_STAGES") {
            Ok(raw) => parse_stage_list(&raw)?,
            Err(_) => defaults.stages,
        };

        let exclude_owned_items = match env::var("APP_EXCLUDE_OWNED") {
            Ok(raw) => parse_flag("APP_EXCLUDE_OWNED", &raw)?,
            Err(_) => defaults.exclude_owned_items,
        };

        let result_limit = match env::var("APP_RESULT_LIMIT") {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidResultLimit)?,
            ),
            Err(_) => defaults.result_limit,
        };

        Ok(Self {
            stages,
            exclude_owned_items,
            result_limit,
        })
    }
}

/// Parse a comma separated stage list. An empty list is a valid pipeline.
pub fn parse_stage_list(raw: &str) -> Result<Vec<StageKind>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<StageKind>().map_err(ConfigError::UnknownStage))
        .collect()
}

fn parse_flag(variable: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { variable }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownStage(UnknownStageKind),
    InvalidFlag { variable: &'static str },
    InvalidResultLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownStage(err) => write!(f, "APP_ENGINE_STAGES: {}", err),
            ConfigError::InvalidFlag { variable } => {
                write!(f, "{} must be true/false, yes/no, on/off or 1/0", variable)
            }
            ConfigError::InvalidResultLimit => {
                write!(f, "APP_RESULT_LIMIT must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::UnknownStage(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidResultLimit => None,
        }
    }
}
