use anyhow::Result;
use std::path::PathBuf;

/// Get the base path override from the environment, if any
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("HOTCOMMENTS_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("hotcomments");

        Ok(Self::from_base(base_dir))
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("hotcomments.log")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/hotcomments on Linux), falling back to the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".hotcomments")))
    }
}

/// File names used for a movie's exports, e.g. `movie_34780991_comments.json`.
pub fn export_file_names(movie_id: &str) -> (String, String) {
    (
        format!("movie_{}_comments.json", movie_id),
        format!("movie_{}_comments.csv", movie_id),
    )
}
