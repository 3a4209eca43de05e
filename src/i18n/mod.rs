//! Bilingual label subsystem.
//!
//! Two embedded bundles (English, Gujarati) are parsed once into a
//! process-wide [`LocaleTable`]. Labels are resolved through a total
//! lookup: a hit returns the translation, a key missing from the active
//! language falls back to English, and a miss in both returns the trimmed
//! input.

pub mod resolve;
pub mod table;

pub use resolve::{resolve, Localizer};
pub use table::{I18nError, Language, LocaleTable};
