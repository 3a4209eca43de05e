//! Client configuration: optional JSON file, overridden by CLI flags.
//!
//! Default location: `<config_dir>/shubh-muhurat/config.json`. A missing
//! default file means defaults; a file named explicitly must exist.

use crate::i18n::Language;
use crate::timefmt::{ClockStyle, TimeStyle};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://shubh-muhurat-server.onrender.com";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    /// IANA zone used to display times.
    pub timezone: String,
    pub clock: ClockStyle,
    pub language: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            timezone: DEFAULT_TIMEZONE.to_string(),
            clock: ClockStyle::default(),
            language: Language::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown timezone '{0}'. Use IANA format (e.g. Asia/Kolkata).")]
    UnknownTimezone(String),
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("shubh-muhurat").join("config.json"))
    }

    /// Load `explicit` if given, otherwise the default file if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn time_style(&self) -> Result<TimeStyle, ConfigError> {
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))?;
        Ok(TimeStyle { tz, clock: self.clock })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.language, Language::En);
        assert_eq!(c.timeout(), Duration::from_secs(15));
        assert_eq!(c.time_style().unwrap(), TimeStyle::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"language": "gu", "clock": "24h"}"#);
        let c = Config::load(Some(&path)).unwrap();
        assert_eq!(c.language, Language::Gu);
        assert_eq!(c.clock, ClockStyle::TwentyFourHour);
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.timezone, "Asia/Kolkata");
    }

    #[test]
    fn test_full_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"base_url": "http://localhost:5000", "timeout_secs": 3,
                "timezone": "America/New_York", "clock": "12h", "language": "en"}"#,
        );
        let c = Config::load_from(&path).unwrap();
        assert_eq!(c.base_url, "http://localhost:5000");
        assert_eq!(c.timeout(), Duration::from_secs(3));
        assert_eq!(c.time_style().unwrap().tz, chrono_tz::America::New_York);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ not json");
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_unknown_language_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"language": "fr"}"#);
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_bad_timezone() {
        let c = Config { timezone: "Mars/Olympus".into(), ..Config::default() };
        let err = c.time_style().unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let c = Config { timeout_secs: 0, ..Config::default() };
        assert_eq!(c.timeout(), Duration::from_secs(1));
    }
}
