use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::resolver::ResolverStrategy;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com";
/// Municipalities of Nueva Vizcaya, Philippines, from the PSGC API.
pub const DEFAULT_DIRECTORY_URL: &str =
    "https://psgc.gitlab.io/api/provinces/025000000/municipalities/";
pub const DEFAULT_USER_AGENT: &str = concat!("cityweather/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Bounded retry for the weather fetch. `max_attempts = 1` means a single try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff_ms: 250,
        }
    }
}

impl RetryPolicy {
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            backoff_ms: 0,
        }
    }

    /// Delay before the given retry (1-based), growing linearly.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(retry)))
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// strategy = "directory"
/// timeout_secs = 5
///
/// [retry]
/// max_attempts = 3
/// backoff_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location resolver strategy, "direct" or "directory".
    pub strategy: String,
    pub geocoder_url: String,
    pub weather_url: String,
    pub directory_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: ResolverStrategy::default().to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Return the configured strategy as a strongly-typed value.
    pub fn strategy(&self) -> Result<ResolverStrategy> {
        ResolverStrategy::try_from(self.strategy.as_str())
    }

    pub fn set_strategy(&mut self, strategy: ResolverStrategy) {
        self.strategy = strategy.as_str().to_string();
    }

    /// Reject values that would make every lookup fail.
    pub fn validate(&self) -> Result<()> {
        self.strategy()?;
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be at least 1"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP client shared by every provider: per-request timeout plus user agent.
    pub fn build_http_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout())
            .user_agent(self.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        // Surface bad values at load time rather than on first lookup.
        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
