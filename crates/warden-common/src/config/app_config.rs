//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present).

use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use warden_core::{Snowflake, Thresholds};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bot token for authenticating platform REST calls
    pub bot_token: String,
    /// The bot's application id on the platform
    pub application_id: Snowflake,
    /// The single server this bot moderates
    pub guild_id: Snowflake,
    /// Members carrying this role may use the admin command set
    pub admin_role_id: Snowflake,

    pub server: ServerConfig,
    /// Shared secret the platform must present on webhook deliveries
    pub endpoint_secret: String,

    /// Directory holding the JSON documents
    pub data_dir: PathBuf,

    /// Warning counts at which mute/kick/ban become due
    pub thresholds: Thresholds,
    /// Duration applied by threshold-triggered mutes, distinct from
    /// manually-issued ones
    pub auto_mute_minutes: u32,
    /// Whether divorce executes immediately or requires the spouse's consent
    pub divorce_policy: DivorcePolicy,

    /// Base URL of the platform REST API
    pub platform_api_base: String,

    /// Present only when registration ingestion is enabled
    pub registration: Option<RegistrationConfig>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Divorce consent policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivorcePolicy {
    /// The applicant's divorce takes effect immediately
    #[default]
    Unilateral,
    /// The spouse must accept before the marriage ends
    Mutual,
}

/// Registration ingestion configuration
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    /// Channel whose free-text messages are parsed as registrations
    pub channel_id: Snowflake,
    /// Path of the local sheet file rows are appended to
    pub sheet_path: PathBuf,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_auto_mute_minutes() -> u32 {
    1440 // 24 hours
}

fn default_platform_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or
    /// unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let registration = match env::var("REGISTRATION_CHANNEL_ID").ok() {
            Some(raw) => Some(RegistrationConfig {
                channel_id: parse_id("REGISTRATION_CHANNEL_ID", &raw)?,
                sheet_path: env::var("REGISTRATION_SHEET_PATH")
                    .map(PathBuf::from)
                    .map_err(|_| ConfigError::MissingVar("REGISTRATION_SHEET_PATH"))?,
            }),
            None => None,
        };

        Ok(Self {
            bot_token: env::var("BOT_TOKEN").map_err(|_| ConfigError::MissingVar("BOT_TOKEN"))?,
            application_id: required_id("APPLICATION_ID")?,
            guild_id: required_id("GUILD_ID")?,
            admin_role_id: required_id("ADMIN_ROLE_ID")?,
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| default_host()),
                port: env::var("PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_port),
            },
            endpoint_secret: env::var("ENDPOINT_SECRET")
                .map_err(|_| ConfigError::MissingVar("ENDPOINT_SECRET"))?,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
            thresholds: Thresholds {
                mute: optional_u32("WARN_THRESHOLD_MUTE")?.unwrap_or(3),
                kick: optional_u32("WARN_THRESHOLD_KICK")?.unwrap_or(5),
                ban: optional_u32("WARN_THRESHOLD_BAN")?.unwrap_or(7),
            },
            auto_mute_minutes: optional_u32("AUTO_MUTE_MINUTES")?
                .unwrap_or_else(default_auto_mute_minutes),
            divorce_policy: match env::var("DIVORCE_POLICY").ok().as_deref() {
                None | Some("unilateral") => DivorcePolicy::Unilateral,
                Some("mutual") => DivorcePolicy::Mutual,
                Some(other) => {
                    return Err(ConfigError::InvalidValue("DIVORCE_POLICY", other.to_string()))
                }
            },
            platform_api_base: env::var("PLATFORM_API_BASE")
                .unwrap_or_else(|_| default_platform_api_base()),
            registration,
        })
    }
}

fn required_id(name: &'static str) -> Result<Snowflake, ConfigError> {
    let raw = env::var(name).map_err(|_| ConfigError::MissingVar(name))?;
    parse_id(name, &raw)
}

fn parse_id(name: &'static str, raw: &str) -> Result<Snowflake, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidValue(name, raw.to_string()))
}

fn optional_u32(name: &'static str) -> Result<Option<u32>, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(None),
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
