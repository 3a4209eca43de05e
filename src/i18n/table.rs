//! Language codes and the flat key → string tables behind them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const EN_BUNDLE: &str = include_str!("../../locales/en.json");
const GU_BUNDLE: &str = include_str!("../../locales/gu.json");

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Gu,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Gu];

    /// Consulted when the active language has no entry for a key.
    pub const FALLBACK: Language = Language::En;

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Gu => "gu",
        }
    }

    /// Name of the language in its own script, as shown on the switch buttons.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Gu => "ગુજરાતી",
        }
    }

    /// Parse a language code. Case-insensitive; region tags are ignored
    /// (`gu-IN` → `Gu`).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        let primary = value.split(['-', '_']).next().unwrap_or("");
        match primary {
            "en" => Some(Self::En),
            "gu" => Some(Self::Gu),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| I18nError::UnknownLanguage(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("Unknown language '{0}'. Use 'en' or 'gu'.")]
    UnknownLanguage(String),

    #[error("Locale bundle '{lang}' is not a flat string map: {source}")]
    Bundle {
        lang: Language,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable translation tables, one flat map per language.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl LocaleTable {
    /// The tables compiled into the binary, parsed on first use.
    ///
    /// The embedded bundles are checked by the test suite, so a parse
    /// failure here degrades to an empty table (every label falls through
    /// to its raw text) rather than aborting.
    pub fn builtin() -> &'static LocaleTable {
        static TABLE: OnceLock<LocaleTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            Self::from_bundles(&[(Language::En, EN_BUNDLE), (Language::Gu, GU_BUNDLE)])
                .unwrap_or_else(|e| {
                    tracing::error!("{}", e);
                    LocaleTable::default()
                })
        })
    }

    /// Build a table from JSON bundles. Each bundle must be a flat object
    /// of string values.
    pub fn from_bundles(bundles: &[(Language, &str)]) -> Result<Self, I18nError> {
        let mut tables = HashMap::new();
        for &(lang, json) in bundles {
            let map: HashMap<String, String> = serde_json::from_str(json)
                .map_err(|source| I18nError::Bundle { lang, source })?;
            tables.insert(lang, map);
        }
        Ok(Self { tables })
    }

    /// Exact, case-sensitive key lookup.
    pub fn lookup(&self, lang: Language, key: &str) -> Option<&str> {
        self.tables.get(&lang)?.get(key).map(String::as_str)
    }

    pub fn keys(&self, lang: Language) -> impl Iterator<Item = &str> {
        self.tables
            .get(&lang)
            .into_iter()
            .flat_map(|t| t.keys().map(String::as_str))
    }

    pub fn len(&self, lang: Language) -> usize {
        self.tables.get(&lang).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(HashMap::is_empty)
    }
}
