//! Memoisation of locale formatters.
//!
//! Building a number or date formatter is the expensive part of locale-aware
//! formatting, so [`FormatterCache`] keeps one instance per locale (numbers)
//! and per locale and option set (dates). Entries are never evicted; the
//! number of distinct locales and options a process sees is small.
//!
//! Two threads missing the same key at once may both build a formatter. The
//! first insert wins and the duplicate is dropped, which is harmless because
//! both are equivalent.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;
use unic_langid::LanguageIdentifier;

use crate::error::CapabilityError;
use crate::locale::{
    BuiltinLocaleServices, DateTimeFormat, DateTimeOptions, LocaleServices, NumberFormat,
    PluralCategory, PluralKind,
};

type DateKey = (LanguageIdentifier, DateTimeOptions);

/// Per-locale cache of formatters built by a [`LocaleServices`] backend.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::FormatterCache;
/// use unic_langid::langid;
///
/// let cache = FormatterCache::builtin();
/// let en = langid!("en");
/// assert_eq!(cache.number_format(&en).format(1234.0), "1,234");
/// assert_eq!(cache.number_formats_len(), 1);
/// ```
pub struct FormatterCache {
    services: Arc<dyn LocaleServices>,
    numbers: RwLock<HashMap<LanguageIdentifier, Arc<dyn NumberFormat>>>,
    dates: RwLock<HashMap<DateKey, Arc<dyn DateTimeFormat>>>,
}

impl FormatterCache {
    /// Creates an empty cache over `services`.
    #[must_use]
    pub fn new(services: Arc<dyn LocaleServices>) -> Self {
        Self {
            services,
            numbers: RwLock::new(HashMap::new()),
            dates: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an empty cache over [`BuiltinLocaleServices`].
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Arc::new(BuiltinLocaleServices::new()))
    }

    /// Returns the number formatter for `locale`, building it on first use.
    #[must_use]
    pub fn number_format(&self, locale: &LanguageIdentifier) -> Arc<dyn NumberFormat> {
        if let Some(format) = self.numbers.read().get(locale) {
            return Arc::clone(format);
        }
        let built = self.services.number_format(locale);
        let mut numbers = self.numbers.write();
        let format = numbers.entry(locale.clone()).or_insert_with(|| {
            trace!(%locale, "cached number formatter");
            built
        });
        Arc::clone(format)
    }

    /// Returns the date/time formatter for `locale` and `options`, building it
    /// on first use.
    #[must_use]
    pub fn date_time_format(
        &self,
        locale: &LanguageIdentifier,
        options: &DateTimeOptions,
    ) -> Arc<dyn DateTimeFormat> {
        let key = (locale.clone(), *options);
        if let Some(format) = self.dates.read().get(&key) {
            return Arc::clone(format);
        }
        let built = self.services.date_time_format(locale, options);
        let mut dates = self.dates.write();
        let format = dates.entry(key).or_insert_with(|| {
            trace!(%locale, ?options, "cached date/time formatter");
            built
        });
        Arc::clone(format)
    }

    /// Classifies `number` through the backing services.
    ///
    /// Plural rules are not cached here; backends memoise them as they see
    /// fit.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`CapabilityError`].
    pub fn plural_category(
        &self,
        locale: &LanguageIdentifier,
        kind: PluralKind,
        number: f64,
    ) -> Result<PluralCategory, CapabilityError> {
        self.services.plural_category(locale, kind, number)
    }

    /// Number of cached number formatters.
    #[must_use]
    pub fn number_formats_len(&self) -> usize {
        self.numbers.read().len()
    }

    /// Number of cached date/time formatters.
    #[must_use]
    pub fn date_time_formats_len(&self) -> usize {
        self.dates.read().len()
    }
}

impl Default for FormatterCache {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for FormatterCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterCache")
            .field("number_formats", &self.number_formats_len())
            .field("date_time_formats", &self.date_time_formats_len())
            .finish_non_exhaustive()
    }
}
