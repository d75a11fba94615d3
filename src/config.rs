use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub usda: UsdaSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsdaSettings {
    #[serde(default = "default_usda_base_url")]
    pub base_url: String,
    #[serde(default = "default_usda_api_key")]
    pub api_key: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_data_types")]
    pub data_types: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UsdaSettings {
    fn default() -> Self {
        Self {
            base_url: default_usda_base_url(),
            api_key: default_usda_api_key(),
            page_size: default_page_size(),
            data_types: default_data_types(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UsdaSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_usda_base_url() -> String { "https://api.nal.usda.gov/fdc/v1".to_string() }
fn default_usda_api_key() -> String { "DEMO_KEY".to_string() }
fn default_page_size() -> u32 { 10 }
fn default_data_types() -> Vec<String> { vec!["Foundation".to_string(), "SR Legacy".to_string()] }
fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl RateLimitSettings {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

fn default_max_requests() -> usize { 30 }
fn default_window_secs() -> u64 { 60 }
fn default_sweep_interval_secs() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NUTRIVAULT__)
    /// 5. USDA_API_KEY, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NUTRIVAULT__RATE_LIMIT__MAX_REQUESTS -> rate_limit.max_requests
            .add_source(env_source())
            .build()?;

        apply_api_key_override(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_api_key_override(settings)?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("NUTRIVAULT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("usda.data_types")
}

/// The USDA key is conventionally provided as a bare `USDA_API_KEY` variable
fn apply_api_key_override(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("USDA_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("usda.api_key", api_key)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate_limit() {
        let rate_limit = RateLimitSettings::default();
        assert_eq!(rate_limit.max_requests, 30);
        assert_eq!(rate_limit.window(), Duration::from_secs(60));
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_usda_defaults() {
        assert_eq!(default_usda_base_url(), "https://api.nal.usda.gov/fdc/v1");
        assert_eq!(default_page_size(), 10);
        assert_eq!(default_data_types(), vec!["Foundation", "SR Legacy"]);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("nutrivault-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 5000

[usda]
base_url = "http://localhost:9000"

[rate_limit]
max_requests = 5
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.usda.base_url, "http://localhost:9000");
        assert_eq!(settings.usda.timeout(), Duration::from_secs(10));
        assert_eq!(settings.rate_limit.max_requests, 5);
        assert_eq!(settings.rate_limit.window_secs, 60);
        assert_eq!(settings.logging.format, "json");
    }
}
