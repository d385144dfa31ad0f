//! UI-language state with a persisted preference.
//!
//! [`UiLanguageState`] is initialized once from a [`PreferenceStore`] and writes
//! through on every explicit change. Rendering code receives it by reference
//! instead of reading a global.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::i18n::{self, DEFAULT_LANGUAGE};
use crate::language::UiLanguage;

/// Storage for the single UI-language preference.
pub trait PreferenceStore: Send {
    fn load_ui_language(&self) -> Result<Option<String>>;
    fn save_ui_language(&mut self, code: &str) -> Result<()>;
}

/// Persists the preference in the JSON config file.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Config::get_config_path()?))
    }
}

impl PreferenceStore for ConfigStore {
    fn load_ui_language(&self) -> Result<Option<String>> {
        Ok(Config::load_from(&self.path)?.ui_lang)
    }

    fn save_ui_language(&mut self, code: &str) -> Result<()> {
        Config::update_at(&self.path, |config| config.ui_lang = Some(code.to_string()))
    }
}

/// Keeps the preference in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub value: Option<String>,
}

impl PreferenceStore for MemoryStore {
    fn load_ui_language(&self) -> Result<Option<String>> {
        Ok(self.value.clone())
    }

    fn save_ui_language(&mut self, code: &str) -> Result<()> {
        self.value = Some(code.to_string());
        Ok(())
    }
}

pub struct UiLanguageState {
    current: UiLanguage,
    store: Box<dyn PreferenceStore>,
}

impl UiLanguageState {
    /// Read the persisted preference, defaulting when absent, unknown, or unreadable.
    pub fn init(store: Box<dyn PreferenceStore>) -> Self {
        let current = match store.load_ui_language() {
            Ok(Some(code)) => UiLanguage::from_code(&code).unwrap_or_else(|| {
                tracing::warn!("Ignoring unknown UI language preference '{}'", code);
                DEFAULT_LANGUAGE
            }),
            Ok(None) => DEFAULT_LANGUAGE,
            Err(e) => {
                tracing::warn!("Could not read UI language preference: {}", e);
                DEFAULT_LANGUAGE
            }
        };

        Self { current, store }
    }

    pub fn in_memory(lang: UiLanguage) -> Self {
        Self {
            current: lang,
            store: Box::new(MemoryStore::default()),
        }
    }

    pub fn current(&self) -> UiLanguage {
        self.current
    }

    /// Switch language and persist it. The in-memory change sticks even if the write fails.
    pub fn set(&mut self, lang: UiLanguage) -> Result<()> {
        self.current = lang;
        self.store.save_ui_language(lang.as_str())
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        i18n::translate(self.current, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_defaults_without_preference() {
        let state = UiLanguageState::init(Box::new(MemoryStore::default()));
        assert_eq!(state.current(), UiLanguage::Tigrinya);
    }

    #[test]
    fn test_init_reads_stored_preference() {
        let store = MemoryStore { value: Some("en".to_string()) };
        let state = UiLanguageState::init(Box::new(store));
        assert_eq!(state.current(), UiLanguage::English);
        assert_eq!(state.t("processing"), "Processing...");
    }

    #[test]
    fn test_init_ignores_unknown_code() {
        let store = MemoryStore { value: Some("xx".to_string()) };
        let state = UiLanguageState::init(Box::new(store));
        assert_eq!(state.current(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_set_writes_through_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut state = UiLanguageState::init(Box::new(ConfigStore::new(path.clone())));
        state.set(UiLanguage::Norwegian).unwrap();
        assert_eq!(state.current(), UiLanguage::Norwegian);

        let reopened = UiLanguageState::init(Box::new(ConfigStore::new(path)));
        assert_eq!(reopened.current(), UiLanguage::Norwegian);
    }

    #[test]
    fn test_config_store_keeps_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config {
            reply_lang: Some("am".to_string()),
            ..Config::new()
        }
        .save_to(&path)
        .unwrap();

        let mut store = ConfigStore::new(path.clone());
        store.save_ui_language("en").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ui_lang.as_deref(), Some("en"));
        assert_eq!(config.reply_lang.as_deref(), Some("am"));
    }

    #[test]
    fn test_set_keeps_unparseable_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let broken = r#"{"api_base_url": "http://example.test""#;
        std::fs::write(&path, broken).unwrap();

        let mut state = UiLanguageState::init(Box::new(ConfigStore::new(path.clone())));
        assert!(state.set(UiLanguage::English).is_err());
        assert_eq!(state.current(), UiLanguage::English);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
    }
}
