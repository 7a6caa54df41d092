pub mod config;
pub mod paths;

pub use config::{BrowserHeaders, ConfigError, CrawlerConfig, MAX_DELAY_SECS};
pub use paths::{export_file_names, PathManager};
