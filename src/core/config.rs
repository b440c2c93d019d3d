use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    pub daemon: DaemonConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub cleanup: CleanupConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_i2c_bus")]
    pub i2c_bus: String,
    #[serde(default = "default_i2c_address")]
    pub i2c_address: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub password: String,
    /// When set, the raw torrent list is dumped here on every stats poll.
    pub dump_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    #[serde(default = "default_cleanup_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cleanup_interval")]
    pub interval_seconds: u64,
    #[serde(default = "default_seed_time_secs")]
    pub seed_time_secs: i64,
    #[serde(default = "default_ratio")]
    pub ratio: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

// Default value functions
fn default_i2c_bus() -> String {
    "/dev/i2c-1".to_string()
}

fn default_i2c_address() -> u8 {
    0x3C
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8112/json".to_string()
}

fn default_tick_seconds() -> u64 {
    1
}

fn default_cleanup_enabled() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    300 // 5 minutes
}

fn default_seed_time_secs() -> i64 {
    174_600 // 48.5 hours
}

fn default_ratio() -> f64 {
    1.05
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_console() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_bus: default_i2c_bus(),
            i2c_address: default_i2c_address(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
        }
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: default_cleanup_enabled(),
            interval_seconds: default_cleanup_interval(),
            seed_time_secs: default_seed_time_secs(),
            ratio: default_ratio(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.display.i2c_bus.is_empty() {
            bail!("i2c_bus must not be empty");
        }

        if self.daemon.endpoint.is_empty() {
            bail!("daemon endpoint must not be empty");
        }

        if self.daemon.password.is_empty() {
            bail!("daemon password must not be empty");
        }

        if self.poll.tick_seconds == 0 {
            bail!("tick_seconds must be greater than 0");
        }

        if self.cleanup.interval_seconds == 0 {
            bail!("cleanup interval_seconds must be greater than 0");
        }

        if self.cleanup.seed_time_secs < 0 {
            bail!("cleanup seed_time_secs must be non-negative");
        }

        if self.cleanup.ratio <= 0.0 {
            bail!("cleanup ratio must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
