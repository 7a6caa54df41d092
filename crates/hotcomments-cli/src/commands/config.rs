use crate::output::{Output, OutputFormat};
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use hotcomments_config::{CrawlerConfig, PathManager};
use std::path::{Path, PathBuf};

/// Load the crawler config from `explicit` (must exist) or the default location (optional).
pub fn load_config(explicit: Option<&Path>) -> Result<CrawlerConfig> {
    match explicit {
        Some(path) => CrawlerConfig::load_from_file(path)
            .wrap_err_with(|| format!("Failed to load config from {}", path.display())),
        None => {
            let path = PathManager::default().config_file();
            CrawlerConfig::load_or_default(&path)
                .wrap_err_with(|| format!("Failed to load config from {}", path.display()))
        }
    }
}

pub fn run_show(config_path: Option<PathBuf>, output: &Output) -> Result<()> {
    let config = load_config(config_path.as_deref())?;

    match output.format() {
        OutputFormat::Human => {
            let text = toml::to_string_pretty(&config).wrap_err("Failed to render config")?;
            output.info(text.trim_end());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = serde_json::to_value(&config).wrap_err("Failed to render config")?;
            output.json(&value);
        }
    }
    Ok(())
}

pub fn run_init(config_path: Option<PathBuf>, force: bool, output: &Output) -> Result<()> {
    let path = config_path.unwrap_or_else(|| PathManager::default().config_file());

    if path.exists() && !force {
        return Err(eyre!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    CrawlerConfig::default()
        .save_to_file(&path)
        .map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;
    output.success(format!("Wrote default config to {}", path.display()));
    Ok(())
}
