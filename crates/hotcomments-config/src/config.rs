use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Upper bound accepted for either politeness delay bound, in seconds.
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Settings for one crawl of a movie's hot comment listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrawlerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_delay_min_secs")]
    pub delay_min_secs: f64,
    #[serde(default = "default_delay_max_secs")]
    pub delay_max_secs: f64,
    /// Pause after the final page too, as every other page does.
    #[serde(default = "default_true")]
    pub pause_after_last_page: bool,
    /// Listing filter: "P" selects comments from users who have watched the movie.
    #[serde(default = "default_status")]
    pub status: String,
    /// "new_score" is the hot ordering; "time" would be chronological.
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default)]
    pub headers: BrowserHeaders,
}

/// Request headers that make the crawler look like a desktop browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserHeaders {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept")]
    pub accept: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

fn default_base_url() -> String {
    "https://movie.douban.com/subject".to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_delay_min_secs() -> f64 {
    1.0
}

fn default_delay_max_secs() -> f64 {
    3.0
}

fn default_true() -> bool {
    true
}

fn default_status() -> String {
    "P".to_string()
}

fn default_sort() -> String {
    "new_score".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".to_string()
}

fn default_accept_language() -> String {
    "zh-CN,zh;q=0.9,en;q=0.8".to_string()
}

impl Default for BrowserHeaders {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            delay_min_secs: default_delay_min_secs(),
            delay_max_secs: default_delay_max_secs(),
            pause_after_last_page: default_true(),
            status: default_status(),
            sort: default_sort(),
            headers: BrowserHeaders::default(),
        }
    }
}

impl CrawlerConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: CrawlerConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading crawler config");
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url cannot be empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be positive".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".to_string()));
        }
        if !self.delay_min_secs.is_finite() || !self.delay_max_secs.is_finite() {
            return Err(ConfigError::Invalid("delay bounds must be finite".to_string()));
        }
        if self.delay_min_secs < 0.0 {
            return Err(ConfigError::Invalid("delay_min_secs must be non-negative".to_string()));
        }
        if self.delay_max_secs > MAX_DELAY_SECS {
            return Err(ConfigError::Invalid(format!(
                "delay_max_secs ({}) exceeds the {} s limit",
                self.delay_max_secs, MAX_DELAY_SECS
            )));
        }
        if self.delay_min_secs > self.delay_max_secs {
            return Err(ConfigError::Invalid(format!(
                "delay_min_secs ({}) is greater than delay_max_secs ({})",
                self.delay_min_secs, self.delay_max_secs
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Listing URL for one movie, without query parameters.
    pub fn comments_url(&self, movie_id: &str) -> String {
        format!("{}/{}/comments", self.base_url.trim_end_matches('/'), movie_id)
    }
}
