pub mod config;
pub mod crawl;
pub mod crawl_ui;
