//! Host locale capabilities consumed by the formatter.
//!
//! The formatter never classifies plural categories or formats numbers and
//! dates itself. It asks a [`LocaleServices`] implementation, which keeps the
//! interpreter deterministic under test and lets hosts plug in whatever
//! locale data they already ship. [`BuiltinLocaleServices`] covers the common
//! case without extra setup.

mod builtin;
mod direction;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use unic_langid::LanguageIdentifier;

use crate::error::CapabilityError;

pub use builtin::BuiltinLocaleServices;
pub use direction::{Direction, text_direction};

/// Which plural rule set classifies a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralKind {
    /// Quantities: `plural` arguments.
    Cardinal,
    /// Positions in a sequence: `selectordinal` arguments.
    Ordinal,
}

/// A CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    /// `zero`
    Zero,
    /// `one`
    One,
    /// `two`
    Two,
    /// `few`
    Few,
    /// `many`
    Many,
    /// `other`
    Other,
}

impl PluralCategory {
    /// Returns the selector used for this category in branch tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length of a date or time rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeStyle {
    /// Numeric, e.g. `1/2/24`.
    Short,
    /// Abbreviated, e.g. `Jan 2, 2024`.
    Medium,
    /// Spelled out, e.g. `January 2, 2024`.
    Long,
}

/// Options identifying one date/time formatter.
///
/// Part of the cache key, so two equal option sets share a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateTimeOptions {
    /// Style of the date portion, omitted when `None`.
    pub date_style: Option<DateTimeStyle>,
    /// Style of the time portion, omitted when `None`.
    pub time_style: Option<DateTimeStyle>,
}

impl DateTimeOptions {
    /// Options used by `{name, date}` arguments.
    pub const MEDIUM_DATE: Self = Self {
        date_style: Some(DateTimeStyle::Medium),
        time_style: None,
    };

    /// Options used by `{name, time}` arguments.
    pub const MEDIUM_TIME: Self = Self {
        date_style: None,
        time_style: Some(DateTimeStyle::Medium),
    };
}

/// Locale-aware number formatting.
pub trait NumberFormat: Send + Sync {
    /// Formats `number` for display.
    fn format(&self, number: f64) -> String;
}

/// Locale-aware date and time formatting.
pub trait DateTimeFormat: Send + Sync {
    /// Formats `at` for display.
    fn format(&self, at: DateTime<Utc>) -> String;
}

/// Factory for the locale capabilities the formatter delegates to.
///
/// Formatter construction is assumed to be comparatively expensive;
/// [`FormatterCache`](crate::FormatterCache) memoises the factories so each
/// locale (and option set) is built once.
pub trait LocaleServices: Send + Sync {
    /// Classifies `number` into a plural category for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] when the locale has no plural rules or
    /// the number cannot be classified. The formatter then falls back to
    /// the `other` category.
    fn plural_category(
        &self,
        locale: &LanguageIdentifier,
        kind: PluralKind,
        number: f64,
    ) -> Result<PluralCategory, CapabilityError>;

    /// Builds a number formatter for `locale`.
    fn number_format(&self, locale: &LanguageIdentifier) -> Arc<dyn NumberFormat>;

    /// Builds a date/time formatter for `locale` and `options`.
    fn date_time_format(
        &self,
        locale: &LanguageIdentifier,
        options: &DateTimeOptions,
    ) -> Arc<dyn DateTimeFormat>;
}

impl<F> NumberFormat for F
where
    F: Fn(f64) -> String + Send + Sync,
{
    fn format(&self, number: f64) -> String {
        self(number)
    }
}

impl<F> DateTimeFormat for F
where
    F: Fn(DateTime<Utc>) -> String + Send + Sync,
{
    fn format(&self, at: DateTime<Utc>) -> String {
        self(at)
    }
}
