//! Language codes used by the client.
//!
//! Two independent selections exist: the UI language (labels, placeholders,
//! notices) and the reply language (what the assistant answers in).

use serde::{Deserialize, Serialize};

/// Language of the interface labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UiLanguage {
    #[default]
    Tigrinya,
    English,
    Norwegian,
}

impl UiLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiLanguage::Tigrinya => "ti",
            UiLanguage::English => "en",
            UiLanguage::Norwegian => "no",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ti" => Some(UiLanguage::Tigrinya),
            "en" => Some(UiLanguage::English),
            "no" | "nb" => Some(UiLanguage::Norwegian),
            _ => None,
        }
    }

    pub fn all() -> Vec<UiLanguage> {
        vec![UiLanguage::Tigrinya, UiLanguage::English, UiLanguage::Norwegian]
    }

    /// Name of the language written in itself, as shown in the selector.
    pub fn native_name(&self) -> &'static str {
        match self {
            UiLanguage::Tigrinya => "ትግርኛ",
            UiLanguage::English => "English",
            UiLanguage::Norwegian => "Norsk",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            UiLanguage::Tigrinya => UiLanguage::English,
            UiLanguage::English => UiLanguage::Norwegian,
            UiLanguage::Norwegian => UiLanguage::Tigrinya,
        }
    }
}

/// Language the assistant should answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReplyLanguage {
    English,
    #[default]
    Tigrinya,
    Norwegian,
    Arabic,
    Amharic,
}

impl ReplyLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyLanguage::English => "en",
            ReplyLanguage::Tigrinya => "ti",
            ReplyLanguage::Norwegian => "no",
            ReplyLanguage::Arabic => "ar",
            ReplyLanguage::Amharic => "am",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Some(ReplyLanguage::English),
            "ti" => Some(ReplyLanguage::Tigrinya),
            "no" | "nb" => Some(ReplyLanguage::Norwegian),
            "ar" => Some(ReplyLanguage::Arabic),
            "am" => Some(ReplyLanguage::Amharic),
            _ => None,
        }
    }

    pub fn all() -> Vec<ReplyLanguage> {
        vec![
            ReplyLanguage::English,
            ReplyLanguage::Tigrinya,
            ReplyLanguage::Norwegian,
            ReplyLanguage::Arabic,
            ReplyLanguage::Amharic,
        ]
    }

    /// English display name used in translation result prefixes.
    pub fn display_name(&self) -> &'static str {
        match self {
            ReplyLanguage::English => "English",
            ReplyLanguage::Tigrinya => "Tigrinya",
            ReplyLanguage::Norwegian => "Norwegian",
            ReplyLanguage::Arabic => "Arabic",
            ReplyLanguage::Amharic => "Amharic",
        }
    }

    /// Translation-table key for the localized option label.
    pub fn label_key(&self) -> &'static str {
        match self {
            ReplyLanguage::English => "english",
            ReplyLanguage::Tigrinya => "tigrinya",
            ReplyLanguage::Norwegian => "norwegian",
            ReplyLanguage::Arabic => "arabic",
            ReplyLanguage::Amharic => "amharic",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

/// Human-readable name for a reply-language code, or the code itself when unknown.
pub fn reply_language_name(code: &str) -> String {
    ReplyLanguage::from_code(code)
        .map(|l| l.display_name().to_string())
        .unwrap_or_else(|| code.to_string())
}
