use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::language::{ReplyLanguage, UiLanguage};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub ui_lang: Option<String>,
    pub reply_lang: Option<String>,
    pub api_base_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config file {:?}: {}", config_path, e))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    pub fn save_reply_language(lang: ReplyLanguage) -> Result<()> {
        Self::update_at(&Self::get_config_path()?, |config| {
            config.reply_lang = Some(lang.as_str().to_string());
        })
    }

    /// Load, modify and save the config at `config_path`. A file that exists but
    /// does not parse is left untouched and reported as an error.
    pub fn update_at(config_path: &Path, change: impl FnOnce(&mut Config)) -> Result<()> {
        let mut config = Self::load_from(config_path)?;
        change(&mut config);
        config.save_to(config_path)
    }

    /// Stored UI language, if present and recognized.
    pub fn ui_language(&self) -> Option<UiLanguage> {
        self.ui_lang.as_deref().and_then(UiLanguage::from_code)
    }

    pub fn reply_language(&self) -> ReplyLanguage {
        self.reply_lang
            .as_deref()
            .and_then(ReplyLanguage::from_code)
            .unwrap_or_default()
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("tigrinja").join("config.json"))
    }
}
