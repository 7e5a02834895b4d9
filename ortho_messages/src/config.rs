//! Formatter configuration.
//!
//! Values are layered with `figment`: built-in defaults, then an optional
//! TOML file, then `ORTHO_MESSAGES_*` environment variables. Later layers
//! win.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use unic_langid::{LanguageIdentifier, langid};

use crate::error::ConfigError;

/// Prefix of environment variables read by [`FormatterConfig::load`].
pub const ENV_PREFIX: &str = "ORTHO_MESSAGES_";

/// Default nesting limit for branches and paired tags.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Tunables for [`MessageFormatter`](crate::MessageFormatter).
///
/// # Examples
///
/// ```rust
/// use ortho_messages::FormatterConfig;
///
/// let config = FormatterConfig::default();
/// assert_eq!(config.max_depth, 32);
/// assert_eq!(config.parse_locale("not a locale!").to_string(), "en");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Deepest nesting that is still interpreted, counting plural/select
    /// branches and paired tags together. A branch or paired tag past the
    /// limit is emitted as literal text.
    pub max_depth: usize,
    /// Locale used when a caller-supplied tag cannot be parsed.
    pub default_locale: LanguageIdentifier,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            default_locale: langid!("en"),
        }
    }
}

impl FormatterConfig {
    /// Loads configuration from defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an environment override has the wrong
    /// shape, e.g. a non-numeric `ORTHO_MESSAGES_MAX_DEPTH`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Loads configuration from defaults, the TOML file at `path` (when it
    /// exists), and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is not valid TOML or a value has
    /// the wrong shape.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX));
        Self::extract(figment)
    }

    /// Parses a BCP 47 locale tag, falling back to
    /// [`default_locale`](Self::default_locale) when it is malformed.
    #[must_use]
    pub fn parse_locale(&self, tag: &str) -> LanguageIdentifier {
        tag.trim()
            .parse()
            .unwrap_or_else(|_| self.default_locale.clone())
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(ConfigError::from)
    }
}
