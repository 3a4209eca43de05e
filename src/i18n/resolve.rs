//! Label resolution: dictionary key or opaque proper noun → display text.

use super::table::{Language, LocaleTable};

/// Resolve a raw label against `table` for `lang`.
///
/// Surrounding whitespace is trimmed. Empty input yields `""`. A trimmed
/// value that is a key for `lang` yields its translation, then the English
/// entry is tried; anything else is returned as the trimmed input.
pub fn resolve(table: &LocaleTable, raw: &str, lang: Language) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    table
        .lookup(lang, trimmed)
        .or_else(|| table.lookup(Language::FALLBACK, trimmed))
        .unwrap_or(trimmed)
        .to_string()
}

/// A table paired with the active language. Cheap to copy; build a new one
/// whenever the language changes.
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    table: &'a LocaleTable,
    lang: Language,
}

impl<'a> Localizer<'a> {
    pub fn new(table: &'a LocaleTable, lang: Language) -> Self {
        Self { table, lang }
    }

    /// Localizer over the embedded bundles.
    pub fn builtin(lang: Language) -> Localizer<'static> {
        Localizer::new(LocaleTable::builtin(), lang)
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// UI chrome label.
    pub fn t(&self, key: &str) -> String {
        resolve(self.table, key, self.lang)
    }

    /// Label coming from the remote service, which may be untranslated.
    pub fn label(&self, raw: &str) -> String {
        resolve(self.table, raw, self.lang)
    }

    /// Optional label; `None` resolves to `""`.
    pub fn label_opt(&self, raw: Option<&str>) -> String {
        raw.map(|r| self.label(r)).unwrap_or_default()
    }
}
