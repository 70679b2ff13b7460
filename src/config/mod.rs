#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConnectionSettings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use std::time::Duration;

#[cfg(feature = "cli")]
use crate::config::{cli::Command, toml_config::TomlConfig};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Resolved settings for one connection to the build service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl ConnectionConfig {
    pub const DEFAULT_API_URL: &'static str = "https://api.opensuse.org";
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ConnectionSettings for ConnectionConfig {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Validate for ConnectionConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.url", &self.api_url)?;

        if let Some(username) = &self.username {
            validate_non_empty_string("api.username", username)?;
        }
        if self.password.is_some() {
            validate_required_field("api.username", &self.username)?;
        }

        validate_range("api.timeout_seconds", self.timeout.as_secs(), 1, 600)?;

        tracing::debug!("Connection configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "obs-client")]
#[command(about = "Command line client for the Open Build Service API")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with an [api] section")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "OBS_API_URL")]
    pub api_url: Option<String>,

    #[arg(long, env = "OBS_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "OBS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Settings from `--config` (if any), overridden by command line values.
    pub fn connection(&self) -> Result<ConnectionConfig> {
        let mut connection = match &self.config {
            Some(path) => ConnectionConfig::from(TomlConfig::from_file(path)?),
            None => ConnectionConfig::default(),
        };

        if let Some(api_url) = &self.api_url {
            connection.api_url = api_url.clone();
        }
        if let Some(username) = &self.username {
            connection.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            connection.password = Some(password.clone());
        }
        if let Some(timeout) = self.timeout {
            connection.timeout = Duration::from_secs(timeout);
        }

        connection.validate()?;
        Ok(connection)
    }
}
