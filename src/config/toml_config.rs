use crate::config::ConnectionConfig;
use crate::domain::ports::ConnectionSettings;
use crate::utils::error::{ObsError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ObsError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ObsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OBS_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ObsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.api
                .timeout_seconds
                .unwrap_or(ConnectionConfig::DEFAULT_TIMEOUT_SECONDS),
        )
    }
}

impl ConnectionSettings for TomlConfig {
    fn api_url(&self) -> &str {
        &self.api.url
    }

    fn username(&self) -> Option<&str> {
        self.api.username.as_deref()
    }

    fn password(&self) -> Option<&str> {
        self.api.password.as_deref()
    }

    fn timeout(&self) -> Duration {
        TomlConfig::timeout(self)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        ConnectionConfig::from(self.clone()).validate()
    }
}

impl From<TomlConfig> for ConnectionConfig {
    fn from(config: TomlConfig) -> Self {
        let timeout = config.timeout();
        ConnectionConfig {
            api_url: config.api.url,
            username: config.api.username,
            password: config.api.password,
            timeout,
        }
    }
}
