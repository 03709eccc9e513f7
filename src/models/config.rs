//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable overriding the search API base URL.
pub const SEARCH_API_URL_ENV: &str = "APPLOY_SEARCH_API_URL";

/// Environment variable overriding the taxonomy API base URL.
pub const TAXONOMY_API_URL_ENV: &str = "APPLOY_TAXONOMY_API_URL";

/// Largest accepted `search.chart_window_hours`, one year.
pub const MAX_CHART_WINDOW_HOURS: i64 = 24 * 365;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API endpoints and HTTP behavior
    #[serde(default)]
    pub api: ApiConfig,

    /// Search and paging behavior
    #[serde(default)]
    pub search: SearchConfig,

    /// Local persistence of saved jobs
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    ///
    /// Environment overrides are applied either way.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let mut config = Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        });
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Override API base URLs from the environment.
    ///
    /// `lookup` resolves a variable name; blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_blank(SEARCH_API_URL_ENV) {
            log::debug!("Search API URL overridden by {}", SEARCH_API_URL_ENV);
            self.api.search_base_url = url;
        }
        if let Some(url) = non_blank(TAXONOMY_API_URL_ENV) {
            log::debug!("Taxonomy API URL overridden by {}", TAXONOMY_API_URL_ENV);
            self.api.taxonomy_base_url = url;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("api.search_base_url", &self.api.search_base_url),
            ("api.taxonomy_base_url", &self.api.taxonomy_base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| AppError::validation(format!("{name} is not a valid URL: {e}")))?;
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.search.page_size == 0 {
            return Err(AppError::validation("search.page_size must be > 0"));
        }
        if self.search.chart_limit == 0 {
            return Err(AppError::validation("search.chart_limit must be > 0"));
        }
        if !(1..=MAX_CHART_WINDOW_HOURS).contains(&self.search.chart_window_hours) {
            return Err(AppError::validation(format!(
                "search.chart_window_hours must be between 1 and {}",
                MAX_CHART_WINDOW_HOURS
            )));
        }
        if self.storage.saved_jobs_key.trim().is_empty() {
            return Err(AppError::validation("storage.saved_jobs_key is empty"));
        }
        Ok(())
    }
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the job search API
    #[serde(default = "defaults::search_base_url")]
    pub search_base_url: String,

    /// Base URL of the taxonomy API
    #[serde(default = "defaults::taxonomy_base_url")]
    pub taxonomy_base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            search_base_url: defaults::search_base_url(),
            taxonomy_base_url: defaults::taxonomy_base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Where filtering happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Filters become query parameters
    #[default]
    Server,
    /// An unfiltered batch is fetched and filtered locally
    Client,
}

/// Search and paging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Jobs per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub mode: SearchMode,

    /// Number of ads fetched for region statistics
    #[serde(default = "defaults::chart_limit")]
    pub chart_limit: usize,

    /// Only ads published within this many hours are counted
    #[serde(default = "defaults::chart_window_hours")]
    pub chart_window_hours: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            mode: SearchMode::default(),
            chart_limit: defaults::chart_limit(),
            chart_window_hours: defaults::chart_window_hours(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage key (file name) of the saved jobs collection
    #[serde(default = "defaults::saved_jobs_key")]
    pub saved_jobs_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            saved_jobs_key: defaults::saved_jobs_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub fn search_base_url() -> String {
        "https://jobsearch.api.jobtechdev.se".into()
    }
    pub fn taxonomy_base_url() -> String {
        "https://taxonomy.api.jobtechdev.se/v1/taxonomy".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; apploy/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_size() -> usize {
        27
    }
    pub fn chart_limit() -> usize {
        100
    }
    pub fn chart_window_hours() -> i64 {
        24
    }
    pub fn saved_jobs_key() -> String {
        "saved_jobs.json".into()
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
