//! Error types surfaced by the message formatter and its collaborators.
//!
//! Formatting a template never fails: malformed syntax degrades to literal
//! text and renderer failures fall back to the unrendered content. The errors
//! below cover the edges where a caller or a host capability can genuinely
//! misbehave.

use std::error::Error as StdError;

use figment::Error as FigmentError;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Boxed error type accepted by [`RenderError::from_source`].
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Failure reported by a tag renderer callback.
///
/// The formatter catches these, logs them, and substitutes the literal tag
/// text (self-closing tags) or the unrendered children (paired tags).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RenderError {
    message: String,
    #[source]
    source: Option<BoxedError>,
}

impl RenderError {
    /// Creates a renderer failure carrying a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error raised while rendering.
    #[must_use]
    pub fn from_source(source: impl Into<BoxedError>) -> Self {
        let boxed = source.into();
        Self {
            message: boxed.to_string(),
            source: Some(boxed),
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure raised by a host locale capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CapabilityError {
    /// The capability has no data for the requested locale.
    #[error("no plural rules available for locale {locale}")]
    UnsupportedLocale {
        /// Locale requested by the formatter.
        locale: LanguageIdentifier,
    },

    /// The number could not be converted into plural operands.
    #[error("cannot classify {value} into a plural category: {reason}")]
    InvalidOperand {
        /// Stringified operand.
        value: String,
        /// Reason reported by the plural rules backend.
        reason: String,
    },
}

/// Errors produced while loading [`FormatterConfig`](crate::FormatterConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Figment could not gather or extract the configuration.
    #[error("failed to load formatter configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),
}

impl From<FigmentError> for ConfigError {
    fn from(value: FigmentError) -> Self {
        Self::Gathering(Box::new(value))
    }
}

/// Errors produced while building a [`MessageTree`](crate::MessageTree) from
/// serialised input.
#[cfg(feature = "serde_json")]
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The JSON document was malformed or not an object of messages.
    #[error("failed to parse message tree: {0}")]
    Json(#[from] serde_json::Error),
}
