//! Configuration management.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, `SOFTSCRAPE__<SECTION>__<KEY>` environment variables, and finally
//! command-line flags applied by the binary.
//!
//! ```toml
//! [api_keys]
//! serpapi = "your-serpapi-key"
//!
//! [search]
//! query = '"Generative AI" AND "productivity"'
//! pages = 10
//! page_size = 10
//! pause_secs = 1.0
//! language = "pt"
//! country = "br"
//!
//! [fetch]
//! timeout_secs = 10
//!
//! [export]
//! output_dir = "./outputs"
//! prefix = "resultados_pesquisa"
//!
//! [logging]
//! level = "info"
//! error_log_dir = "logs/errors"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use config::ConfigError;

/// Boolean query used when none is configured
pub const DEFAULT_QUERY: &str = concat!(
    r#"("Generative AI" OR "LLM" OR "Large Language Model" OR "AI Generative" OR "GENAI") "#,
    r#"AND ("productivity" OR "Efficiency") "#,
    r#"AND ("development teams" OR "software development" OR "software teams" OR developers)"#
);

/// Desktop Chrome identification sent to target sites
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Environment variable holding the SerpApi key
pub const SERPAPI_KEY_VAR: &str = "SERPAPI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeys,

    /// Search query and paging
    #[serde(default)]
    pub search: SearchConfig,

    /// Target page fetching
    #[serde(default)]
    pub fetch: FetchConfig,

    /// CSV export
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeys {
    /// SerpApi key (required for harvesting)
    #[serde(default)]
    pub serpapi: Option<String>,
}

impl Default for ApiKeys {
    fn default() -> Self {
        Self {
            serpapi: std::env::var(SERPAPI_KEY_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty()),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_query")]
    pub query: String,

    /// Number of result pages to request
    #[serde(default = "default_pages")]
    pub pages: usize,

    /// Results per page; page `n` starts at `n * page_size`
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pause after each page, in seconds
    #[serde(default = "default_pause_secs")]
    pub pause_secs: f64,

    /// Interface language (`hl`)
    #[serde(default = "default_language")]
    pub language: String,

    /// Country (`gl`)
    #[serde(default = "default_country")]
    pub country: String,

    /// Search API endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
            pages: default_pages(),
            page_size: default_page_size(),
            pause_secs: default_pause_secs(),
            language: default_language(),
            country: default_country(),
            base_url: default_base_url(),
        }
    }
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn default_pages() -> usize {
    10
}

fn default_page_size() -> usize {
    10
}

fn default_pause_secs() -> f64 {
    1.0
}

fn default_language() -> String {
    "pt".to_string()
}

fn default_country() -> String {
    "br".to_string()
}

fn default_base_url() -> String {
    "https://serpapi.com/search".to_string()
}

/// Target page fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// Page timeouts inside this range need no warning
pub const RECOMMENDED_TIMEOUT_SECS: std::ops::RangeInclusive<u64> = 10..=15;

impl FetchConfig {
    /// Request timeout; zero would fail every request, so it falls back to the default
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(default_timeout_secs()),
            secs => Duration::from_secs(secs),
        }
    }

    /// Whether `timeout_secs` lies outside [`RECOMMENDED_TIMEOUT_SECS`]
    pub fn timeout_out_of_range(&self) -> bool {
        !RECOMMENDED_TIMEOUT_SECS.contains(&self.timeout_secs)
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name prefix, followed by the engine tag and a timestamp
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            prefix: default_prefix(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./outputs")
}

fn default_prefix() -> String {
    "resultados_pesquisa".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory of the error-only log file
    #[serde(default = "default_error_log_dir")]
    pub error_log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            error_log_dir: default_error_log_dir(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_error_log_dir() -> PathBuf {
    PathBuf::from("logs/errors")
}

impl Config {
    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?;

    Ok(with_env_key(settings.try_deserialize()?))
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("SOFTSCRAPE").separator("__")
}

fn with_env_key(mut loaded: Config) -> Config {
    if loaded.api_keys.serpapi.is_none() {
        loaded.api_keys.serpapi = ApiKeys::default().serpapi;
    }
    loaded
}

/// Find a configuration file in the default locations
///
/// Checks `./softscrape.toml`, then `<config dir>/softscrape/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("softscrape.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("softscrape").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Get the configuration from environment variables over the defaults
///
/// An unparsable `SOFTSCRAPE__*` value is an error rather than a silent
/// fallback, the same as when a config file is loaded.
pub fn get_config() -> Result<Config, ConfigError> {
    env_config(env_source())
}

fn env_config(env: config::Environment) -> Result<Config, ConfigError> {
    let settings = config::Config::builder().add_source(env).build()?;
    Ok(with_env_key(settings.try_deserialize()?))
}
