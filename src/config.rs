use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::pager::DEFAULT_PAGE_SIZE;
use crate::engine::history::DEFAULT_HISTORY_CAPACITY;
use crate::engine::view::ViewMode;
use crate::session::SessionOptions;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_words_per_page")]
    pub words_per_page: usize,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub default_view: ViewMode,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_words_per_page() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lexdrill")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_per_page: default_words_per_page(),
            history_capacity: default_history_capacity(),
            theme: default_theme(),
            default_view: ViewMode::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexdrill")
            .join("config.toml")
    }

    /// Replace zero sizes with defaults and blank paths with the default data dir.
    pub fn normalize(&mut self) {
        if self.words_per_page == 0 {
            self.words_per_page = default_words_per_page();
        }
        if self.history_capacity == 0 {
            self.history_capacity = default_history_capacity();
        }
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            words_per_page: self.words_per_page,
            history_capacity: self.history_capacity,
            default_view: self.default_view,
        }
    }
}
