use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "marketsearch";
const CONFIG_FILE: &str = "config.json";

/// User defaults for the command line, stored in the app data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Page size used when `--per-page` is not given
    #[serde(default = "default_per_page")]
    pub default_per_page: i64,

    /// Order direction used when `--order-by` is not given
    #[serde(default = "default_order")]
    pub default_order: String,

    /// Colorize terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_per_page() -> i64 {
    crate::query::planner::DEFAULT_PER_PAGE
}

fn default_order() -> String {
    "desc".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            default_order: default_order(),
            color: default_color(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save config to the app data directory
    pub fn save(&self) -> Result<PathBuf> {
        let path = get_config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    Ok(base.join(APP_NAME))
}
