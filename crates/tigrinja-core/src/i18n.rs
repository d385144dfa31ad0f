//! Static UI string tables with fallback lookup.
//!
//! Every language defines the same keys as [`DEFAULT_LANGUAGE`]. Lookups that
//! miss fall back to the default language and then to the key itself.

use crate::language::UiLanguage;

/// Language used when a key is missing from the requested table.
pub const DEFAULT_LANGUAGE: UiLanguage = UiLanguage::Tigrinya;

pub type StringTable = &'static [(&'static str, &'static str)];

static TIGRINYA: StringTable = &[
    ("main-title", "ዝሓስብ ኮምፒተር ብ´ትግርኛ"),
    ("subtitle", "Tigrinja AI"),
    ("reply-in-label", "መልሲ ብ:"),
    ("auto-detect-info", "ቋንቋ ኣውቶማቲክ ይሕወስ"),
    (
        "welcome-message",
        "👋 ሰላም! ኣነ <strong>Tigrinja AI</strong> እየ። ንምልሲኻ ዝመርጽ ቋንቋ ኣብ ላዕሊ ምረጽ፡ ድሕሪኡ ብእተኻእለካ ቋንቋ ሕቶ ሓቲንካ! መልእኽትኻ ብኣውቶማቲክ ክርድኦ እየ፡ ከምኡውን ብቕኑዕ ክመልስ እየ።",
    ),
    ("input-placeholder", "ብዝመርጽካዮ ቋንቋ ሕተት..."),
    ("send-btn", "ስደድ"),
    ("translate-btn", "ምትርጓም"),
    ("translate-tooltip", "ኣብ Google Translate ክፍትን ንምትርጓም"),
    ("send-tooltip", "መልእኽቲ ሰዲድ"),
    ("processing", "ይሓስብ..."),
    ("english", "English"),
    ("tigrinya", "ትግርኛ"),
    ("norwegian", "Norsk"),
    ("arabic", "Arabic"),
    ("amharic", "Amharic"),
    ("error-no-message", "ብዛዕባ እዚ ኣይኮነን።"),
    ("error-processing", "ይቕሬታ፡ መልእኽትኻ ክሰርሕ ኣይከኣለን።"),
    ("error-connection", "ይቕሬታ፡ ምስ ሰርቨር ክትተሓሓዝ ኣይከኣለን።"),
];

static ENGLISH: StringTable = &[
    ("main-title", "ዝሓስብ ኮምፒተር ብ´ትግርኛ"),
    ("subtitle", "Tigrinja AI"),
    ("reply-in-label", "Reply in:"),
    ("auto-detect-info", "Input language is auto-detected"),
    (
        "welcome-message",
        "👋 Hello! I'm <strong>Tigrinja AI</strong>, your intelligent multilingual assistant. Select your preferred reply language above, then ask me anything in any language! I'll automatically understand your message and respond fluently.",
    ),
    ("input-placeholder", "Ask me anything in any language..."),
    ("send-btn", "Send"),
    ("translate-btn", "Translate"),
    ("translate-tooltip", "Translate and open in Google Translate"),
    ("send-tooltip", "Send message"),
    ("processing", "Processing..."),
    ("english", "English"),
    ("tigrinya", "Tigrinya"),
    ("norwegian", "Norwegian"),
    ("arabic", "Arabic"),
    ("amharic", "Amharic"),
    ("error-no-message", "Please enter some text to translate."),
    ("error-processing", "Sorry, there was an error processing your message."),
    ("error-connection", "Sorry, there was an error connecting to the server."),
];

static NORWEGIAN: StringTable = &[
    ("main-title", "ዝሓስብ ኮምፒተር ብ´ትግርኛ"),
    ("subtitle", "Tigrinja AI"),
    ("reply-in-label", "Svar på:"),
    ("auto-detect-info", "Inndata-språk oppdages automatisk"),
    (
        "welcome-message",
        "👋 Hei! Jeg er <strong>Tigrinja AI</strong>, din intelligente flerspråklige assistent. Velg ditt foretrukne svar på spørsmålet over, og still meg spørsmål på hvilket som helst språk! Jeg forstår meldingen din automatisk og svarer flytende.",
    ),
    ("input-placeholder", "Spør meg hva som helst på hvilket som helst språk..."),
    ("send-btn", "Send"),
    ("translate-btn", "Oversett"),
    ("translate-tooltip", "Oversett og åpne i Google Translate"),
    ("send-tooltip", "Send melding"),
    ("processing", "Behandler..."),
    ("english", "Engelsk"),
    ("tigrinya", "Tigrinja"),
    ("norwegian", "Norsk"),
    ("arabic", "Arabisk"),
    ("amharic", "Amharisk"),
    ("error-no-message", "Vennligst skriv inn tekst å oversette."),
    ("error-processing", "Beklager, det oppstod en feil ved behandling av meldingen din."),
    ("error-connection", "Beklager, det oppstod en feil ved tilkobling til serveren."),
];

/// The full string table for a language.
pub fn table(lang: UiLanguage) -> StringTable {
    match lang {
        UiLanguage::Tigrinya => TIGRINYA,
        UiLanguage::English => ENGLISH,
        UiLanguage::Norwegian => NORWEGIAN,
    }
}

/// Selects the string table for a language.
pub type TableSet = fn(UiLanguage) -> StringTable;

/// Exact lookup in one table, without fallback.
pub fn lookup(lang: UiLanguage, key: &str) -> Option<&'static str> {
    lookup_in(table, lang, key)
}

pub fn lookup_in(tables: TableSet, lang: UiLanguage, key: &str) -> Option<&'static str> {
    tables(lang)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Look up `key` in `lang`, then in the default language. `None` when neither defines it.
pub fn resolve_in(tables: TableSet, lang: UiLanguage, key: &str) -> Option<&'static str> {
    if let Some(text) = lookup_in(tables, lang, key) {
        return Some(text);
    }

    if lang != DEFAULT_LANGUAGE {
        if let Some(text) = lookup_in(tables, DEFAULT_LANGUAGE, key) {
            tracing::debug!(
                "Translation key '{}' missing for '{}', using default language",
                key,
                lang.as_str()
            );
            return Some(text);
        }
    }

    None
}

/// Look up `key` in `lang`, falling back to the default language, then to the key.
pub fn translate<'a>(lang: UiLanguage, key: &'a str) -> &'a str {
    translate_in(table, lang, key)
}

pub fn translate_in<'a>(tables: TableSet, lang: UiLanguage, key: &'a str) -> &'a str {
    match resolve_in(tables, lang, key) {
        Some(text) => text,
        None => {
            tracing::warn!("Missing translation key '{}'", key);
            key
        }
    }
}

/// Keys defined by the default language, in table order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    table(DEFAULT_LANGUAGE).iter().map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn key_set(lang: UiLanguage) -> BTreeSet<&'static str> {
        table(lang).iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_every_language_defines_default_key_set() {
        let expected = key_set(DEFAULT_LANGUAGE);
        for lang in UiLanguage::all() {
            assert_eq!(key_set(lang), expected, "key mismatch for {}", lang.as_str());
            assert_eq!(table(lang).len(), expected.len(), "duplicate key in {}", lang.as_str());
        }
    }

    #[test]
    fn test_translate_uses_requested_language() {
        assert_eq!(translate(UiLanguage::English, "processing"), "Processing...");
        assert_eq!(translate(UiLanguage::Norwegian, "processing"), "Behandler...");
        assert_eq!(translate(UiLanguage::Tigrinya, "processing"), "ይሓስብ...");
    }

    #[test]
    fn test_translate_unknown_key_returns_key() {
        assert_eq!(translate(UiLanguage::English, "no-such-key"), "no-such-key");
    }

    const SPARSE_TI: StringTable = &[("greeting", "ሰላም"), ("only-ti", "ትግርኛ ጥራይ")];
    const SPARSE_EN: StringTable = &[("greeting", "Hello")];
    const SPARSE_NO: StringTable = &[];

    fn sparse(lang: UiLanguage) -> StringTable {
        match lang {
            UiLanguage::Tigrinya => SPARSE_TI,
            UiLanguage::English => SPARSE_EN,
            UiLanguage::Norwegian => SPARSE_NO,
        }
    }

    #[test]
    fn test_missing_key_falls_back_to_default_language() {
        assert_eq!(translate_in(sparse, UiLanguage::English, "greeting"), "Hello");
        assert_eq!(translate_in(sparse, UiLanguage::English, "only-ti"), "ትግርኛ ጥራይ");
        assert_eq!(translate_in(sparse, UiLanguage::Norwegian, "greeting"), "ሰላም");
        assert_eq!(lookup_in(sparse, UiLanguage::English, "only-ti"), None);
    }

    #[test]
    fn test_key_missing_everywhere_returns_key() {
        assert_eq!(resolve_in(sparse, UiLanguage::English, "absent"), None);
        assert_eq!(translate_in(sparse, UiLanguage::Tigrinya, "absent"), "absent");
    }

    #[test]
    fn test_keys_lists_default_table() {
        assert!(keys().any(|k| k == "error-connection"));
        assert_eq!(keys().count(), table(DEFAULT_LANGUAGE).len());
    }
}
