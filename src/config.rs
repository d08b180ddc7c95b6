//! Configuration types for the normalizer.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`LocaleConfig`] - the locale-specific literals every dialect pattern is
//!   built from (morning/afternoon markers, date suffixes, header rule)
//! - [`NormalizerConfig`] - normalizer behaviour (BOM handling, read buffer)
//!
//! # Example
//!
//! ```rust
//! use kakaopack::config::{LocaleConfig, NormalizerConfig};
//!
//! let config = NormalizerConfig::new()
//!     .with_locale(LocaleConfig::korean())
//!     .with_buffer_size(128 * 1024);
//!
//! assert_eq!(config.locale.afternoon, "오후");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::KakaopackError;

/// Locale-specific literals used by the export dialects.
///
/// The dialect patterns are compiled from these values, so supporting a
/// different export locale only requires a different `LocaleConfig`.
///
/// # Example
///
/// ```rust
/// use kakaopack::config::LocaleConfig;
///
/// let locale = LocaleConfig::korean()
///     .with_markers("AM", "PM");
/// assert!(locale.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Token for the morning half of a 12-hour clock (default: `오전`)
    pub morning: String,

    /// Token for the afternoon half of a 12-hour clock (default: `오후`)
    pub afternoon: String,

    /// Suffix after the year in Android dates and headers (default: `년`)
    pub year_suffix: String,

    /// Suffix after the month (default: `월`)
    pub month_suffix: String,

    /// Suffix after the day (default: `일`)
    pub day_suffix: String,

    /// Decorative rule around date-header lines (default: 15 dashes)
    pub header_rule: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::korean()
    }
}

impl LocaleConfig {
    /// Korean locale, as produced by the KakaoTalk clients.
    pub fn korean() -> Self {
        Self {
            morning: "오전".to_string(),
            afternoon: "오후".to_string(),
            year_suffix: "년".to_string(),
            month_suffix: "월".to_string(),
            day_suffix: "일".to_string(),
            header_rule: "-".repeat(15),
        }
    }

    /// Sets the morning and afternoon marker tokens.
    #[must_use]
    pub fn with_markers(mut self, morning: impl Into<String>, afternoon: impl Into<String>) -> Self {
        self.morning = morning.into();
        self.afternoon = afternoon.into();
        self
    }

    /// Sets the year, month and day suffixes.
    #[must_use]
    pub fn with_date_suffixes(
        mut self,
        year: impl Into<String>,
        month: impl Into<String>,
        day: impl Into<String>,
    ) -> Self {
        self.year_suffix = year.into();
        self.month_suffix = month.into();
        self.day_suffix = day.into();
        self
    }

    /// Sets the decorative rule that surrounds date-header lines.
    #[must_use]
    pub fn with_header_rule(mut self, rule: impl Into<String>) -> Self {
        self.header_rule = rule.into();
        self
    }

    /// Checks that the locale can drive unambiguous dialect patterns.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::InvalidLocale`] if a token is empty or the
    /// two markers are identical.
    pub fn validate(&self) -> Result<(), KakaopackError> {
        let fields = [
            ("morning", &self.morning),
            ("afternoon", &self.afternoon),
            ("year_suffix", &self.year_suffix),
            ("month_suffix", &self.month_suffix),
            ("day_suffix", &self.day_suffix),
            ("header_rule", &self.header_rule),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(KakaopackError::invalid_locale(format!(
                    "'{name}' must not be empty"
                )));
            }
        }
        if self.morning == self.afternoon {
            return Err(KakaopackError::invalid_locale(format!(
                "morning and afternoon markers are both '{}'",
                self.morning
            )));
        }
        Ok(())
    }

    /// Parses a locale from TOML. Missing keys fall back to the Korean defaults.
    ///
    /// ```rust
    /// use kakaopack::config::LocaleConfig;
    ///
    /// let locale = LocaleConfig::from_toml_str("morning = \"AM\"\nafternoon = \"PM\"")?;
    /// assert_eq!(locale.morning, "AM");
    /// assert_eq!(locale.day_suffix, "일");
    /// # Ok::<(), kakaopack::KakaopackError>(())
    /// ```
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(content: &str) -> Result<Self, KakaopackError> {
        let locale: LocaleConfig = toml::from_str(content)?;
        locale.validate()?;
        Ok(locale)
    }

    /// Reads a locale from a TOML file.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, KakaopackError> {
        let content = std::fs::read_to_string(path)?;
        let locale = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded locale configuration");
        Ok(locale)
    }
}

/// Configuration for the log normalizer.
///
/// # Example
///
/// ```rust
/// use kakaopack::config::NormalizerConfig;
///
/// let config = NormalizerConfig::new().with_strip_bom(false);
/// assert!(!config.strip_bom);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Locale literals used to build the dialect patterns
    pub locale: LocaleConfig,

    /// Drop a leading byte-order mark from the first line (default: true)
    pub strip_bom: bool,

    /// Read buffer size for file and streaming input (default: 64KB)
    pub buffer_size: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            locale: LocaleConfig::default(),
            strip_bom: true,
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

impl NormalizerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: LocaleConfig) -> Self {
        self.locale = locale;
        self
    }

    /// Sets whether a leading byte-order mark is removed.
    #[must_use]
    pub fn with_strip_bom(mut self, strip: bool) -> Self {
        self.strip_bom = strip;
        self
    }

    /// Sets the read buffer size. Must be non-zero.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Checks the locale and the read buffer size.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::InvalidLocale`] for an unusable locale and
    /// [`KakaopackError::InvalidFormat`] for a zero `buffer_size`, which would
    /// make a buffered reader report end of input before the first line.
    pub fn validate(&self) -> Result<(), KakaopackError> {
        if self.buffer_size == 0 {
            return Err(KakaopackError::invalid_format(
                "config",
                "buffer_size must be greater than zero",
            ));
        }
        self.locale.validate()
    }
}
