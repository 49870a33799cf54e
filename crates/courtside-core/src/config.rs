//! Module: config
//! Responsibility: pagination tunables and their TOML loading.
//! Does not own: per-request resolution beyond limit clamping.
//! Boundary: `PaginationConfig` is read once at construction time.

use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use thiserror::Error as ThisError;

/// Table name used when the settings live inside a larger document.
pub const CONFIG_SECTION: &str = "pagination";

pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const MAX_PAGE_LIMIT: usize = 100;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read pagination config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse pagination config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid pagination config: {0}")]
    Invalid(String),
}

///
/// PaginationConfig
///
/// Page-size defaults and the per-fetch deadline.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    pub fetch_timeout_ms: u64,
}

impl PaginationConfig {
    /// Parse settings from TOML.
    ///
    /// Accepts either a bare table of keys or a document carrying a
    /// `[pagination]` section; other sections are ignored.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(source)?;
        let config: Self = match table.remove(CONFIG_SECTION) {
            Some(section) => section.try_into()?,
            None => toml::Value::Table(table).try_into()?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;

        Self::from_toml_str(&source)
    }

    /// Reject settings the paginator cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(ConfigError::Invalid(
                "default_limit must be positive".to_string(),
            ));
        }
        if self.max_limit < self.default_limit {
            return Err(ConfigError::Invalid(format!(
                "max_limit ({}) must be >= default_limit ({})",
                self.max_limit, self.default_limit
            )));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "fetch_timeout_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve a requested limit: absent or non-positive uses the default,
    /// oversized clamps to the maximum.
    #[must_use]
    pub fn resolve_limit(&self, requested: Option<i64>) -> ClampedLimit {
        let Some(requested) = requested.filter(|limit| *limit > 0) else {
            return ClampedLimit {
                limit: self.default_limit,
                clamped: false,
            };
        };

        match usize::try_from(requested) {
            Ok(limit) if limit <= self.max_limit => ClampedLimit {
                limit,
                clamped: false,
            },
            _ => ClampedLimit {
                limit: self.max_limit,
                clamped: true,
            },
        }
    }

    /// Fetch deadline, never shorter than one millisecond.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms.max(1))
    }

    /// Set the fetch deadline, rounded down to whole milliseconds with a
    /// floor of one.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_ms = u64::try_from(timeout.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        self
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

///
/// ClampedLimit
///
/// Effective page size plus whether the caller asked for more than allowed.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClampedLimit {
    pub limit: usize,
    pub clamped: bool,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{ClampedLimit, ConfigError, PaginationConfig};
    use std::time::Duration;

    #[test]
    fn defaults_are_twenty_hundred_and_five_seconds() {
        let config = PaginationConfig::default();

        assert_eq!(config.default_limit, 20);
        assert_eq!(config.max_limit, 100);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        config.validate().expect("defaults should validate");
    }

    #[test]
    fn resolve_limit_defaults_and_clamps() {
        let config = PaginationConfig::default();
        let default = ClampedLimit {
            limit: 20,
            clamped: false,
        };

        assert_eq!(config.resolve_limit(None), default);
        assert_eq!(config.resolve_limit(Some(0)), default);
        assert_eq!(config.resolve_limit(Some(-3)), default);
        assert_eq!(config.resolve_limit(Some(7)).limit, 7);
        assert_eq!(config.resolve_limit(Some(100)).limit, 100);
        assert_eq!(
            config.resolve_limit(Some(1_000)),
            ClampedLimit {
                limit: 100,
                clamped: true,
            }
        );
        assert!(config.resolve_limit(Some(i64::MAX)).clamped);
    }

    #[test]
    fn from_toml_str_accepts_bare_table_with_partial_keys() {
        let config =
            PaginationConfig::from_toml_str("max_limit = 50\n").expect("bare table should parse");

        assert_eq!(config.max_limit, 50);
        assert_eq!(config.default_limit, 20);
    }

    #[test]
    fn from_toml_str_reads_pagination_section() {
        let source = r#"
            [server]
            bind = "0.0.0.0:8080"

            [pagination]
            default_limit = 10
            fetch_timeout_ms = 250
        "#;
        let config = PaginationConfig::from_toml_str(source).expect("section should parse");

        assert_eq!(config.default_limit, 10);
        assert_eq!(config.fetch_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys_and_bad_values() {
        let err = PaginationConfig::from_toml_str("page_size = 10\n")
            .expect_err("unknown key should be rejected");
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = PaginationConfig::from_toml_str("default_limit = 0\n")
            .expect_err("zero default should be rejected");
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PaginationConfig::from_toml_str("default_limit = 50\nmax_limit = 10\n")
            .expect_err("max below default should be rejected");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_reports_missing_file_as_io() {
        let err = PaginationConfig::load("/nonexistent/courtside/pagination.toml")
            .expect_err("missing file should fail");

        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn with_fetch_timeout_round_trips_millis() {
        let config = PaginationConfig::default().with_fetch_timeout(Duration::from_millis(40));

        assert_eq!(config.fetch_timeout_ms, 40);
    }

    #[test]
    fn zero_fetch_timeout_is_floored_to_one_millisecond() {
        let config = PaginationConfig::default().with_fetch_timeout(Duration::ZERO);
        assert_eq!(config.fetch_timeout_ms, 1);
        config.validate().expect("floored timeout should validate");

        let sub_milli = PaginationConfig::default().with_fetch_timeout(Duration::from_micros(300));
        assert_eq!(sub_milli.fetch_timeout(), Duration::from_millis(1));

        let literal = PaginationConfig {
            fetch_timeout_ms: 0,
            ..PaginationConfig::default()
        };
        assert_eq!(literal.fetch_timeout(), Duration::from_millis(1));
    }
}
