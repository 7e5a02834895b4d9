//! Locale capabilities backed by CLDR plural rules and `chrono`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use intl_pluralrules::{PluralCategory as CldrCategory, PluralRuleType, PluralRules};
use parking_lot::RwLock;
use unic_langid::LanguageIdentifier;

use super::{
    DateTimeFormat, DateTimeOptions, DateTimeStyle, LocaleServices, NumberFormat, PluralCategory,
    PluralKind,
};
use crate::error::CapabilityError;

/// Maximum number of fraction digits rendered by the built-in number format.
const MAX_FRACTION_DIGITS: usize = 3;

/// Default [`LocaleServices`] implementation.
///
/// Plural categories come from the CLDR tables shipped with
/// `intl_pluralrules`. Numbers use per-language grouping and decimal
/// separators with at most three fraction digits. Dates and times are
/// rendered in UTC, with English month names for English locales and
/// numeric patterns elsewhere.
///
/// Plural rule sets are built once per locale and kind and reused.
#[derive(Default)]
pub struct BuiltinLocaleServices {
    plural_rules: RwLock<HashMap<(LanguageIdentifier, PluralKind), PluralRules>>,
}

impl BuiltinLocaleServices {
    /// Creates the service with empty plural rule tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn select(
        rules: &PluralRules,
        number: f64,
    ) -> Result<PluralCategory, CapabilityError> {
        rules
            .select(number)
            .map(from_cldr)
            .map_err(|reason| CapabilityError::InvalidOperand {
                value: number.to_string(),
                reason: reason.to_owned(),
            })
    }
}

impl fmt::Debug for BuiltinLocaleServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinLocaleServices")
            .field("plural_rule_sets", &self.plural_rules.read().len())
            .finish()
    }
}

impl LocaleServices for BuiltinLocaleServices {
    fn plural_category(
        &self,
        locale: &LanguageIdentifier,
        kind: PluralKind,
        number: f64,
    ) -> Result<PluralCategory, CapabilityError> {
        let key = (locale.clone(), kind);
        if let Some(rules) = self.plural_rules.read().get(&key) {
            return Self::select(rules, number);
        }

        let rule_type = match kind {
            PluralKind::Cardinal => PluralRuleType::CARDINAL,
            PluralKind::Ordinal => PluralRuleType::ORDINAL,
        };
        let language_only = LanguageIdentifier::from_parts(locale.language, None, None, &[]);
        let rules = PluralRules::create(locale.clone(), rule_type)
            .or_else(|_| PluralRules::create(language_only, rule_type))
            .map_err(|_| CapabilityError::UnsupportedLocale {
                locale: locale.clone(),
            })?;
        let category = Self::select(&rules, number);
        self.plural_rules.write().entry(key).or_insert(rules);
        category
    }

    fn number_format(&self, locale: &LanguageIdentifier) -> Arc<dyn NumberFormat> {
        Arc::new(GroupedNumberFormat::for_locale(locale))
    }

    fn date_time_format(
        &self,
        locale: &LanguageIdentifier,
        options: &DateTimeOptions,
    ) -> Arc<dyn DateTimeFormat> {
        Arc::new(PatternDateTimeFormat::for_locale(locale, *options))
    }
}

const fn from_cldr(category: CldrCategory) -> PluralCategory {
    match category {
        CldrCategory::ZERO => PluralCategory::Zero,
        CldrCategory::ONE => PluralCategory::One,
        CldrCategory::TWO => PluralCategory::Two,
        CldrCategory::FEW => PluralCategory::Few,
        CldrCategory::MANY => PluralCategory::Many,
        CldrCategory::OTHER => PluralCategory::Other,
    }
}

/// Number format with locale grouping and decimal separators.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupedNumberFormat {
    group: char,
    decimal: char,
    /// Smallest integer digit count at which grouping applies.
    min_grouped_digits: usize,
}

impl GroupedNumberFormat {
    fn for_locale(locale: &LanguageIdentifier) -> Self {
        let (group, decimal) = match locale.language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" | "el" | "ro" | "hr" | "sl"
            | "sr" | "vi" => ('.', ','),
            "fr" => ('\u{202f}', ','),
            "ru" | "pl" | "cs" | "sk" | "uk" | "sv" | "fi" | "nb" | "no" | "hu" | "bg" | "lt"
            | "lv" | "et" => ('\u{a0}', ','),
            _ => (',', '.'),
        };
        let min_grouped_digits = match locale.language.as_str() {
            "es" | "pl" => 5,
            _ => 4,
        };
        Self {
            group,
            decimal,
            min_grouped_digits,
        }
    }
}

impl NumberFormat for GroupedNumberFormat {
    fn format(&self, number: f64) -> String {
        if number.is_nan() {
            return "NaN".to_owned();
        }
        if number.is_infinite() {
            return if number.is_sign_negative() { "-∞" } else { "∞" }.to_owned();
        }

        let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, number.abs());
        let (integer, padded_fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let fraction = padded_fraction.trim_end_matches('0');

        let mut reversed = String::with_capacity(fixed.len() + 8);
        let grouping = integer.len() >= self.min_grouped_digits;
        let mut run = 0_u8;
        for digit in integer.chars().rev() {
            if grouping && run == 3 {
                reversed.push(self.group);
                run = 0;
            }
            reversed.push(digit);
            run += 1;
        }

        let mut out = String::with_capacity(reversed.len() + fraction.len() + 2);
        if number.is_sign_negative() && (integer != "0" || !fraction.is_empty()) {
            out.push('-');
        }
        out.extend(reversed.chars().rev());
        if !fraction.is_empty() {
            out.push(self.decimal);
            out.push_str(fraction);
        }
        out
    }
}

/// Date/time format driven by `chrono` strftime patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PatternDateTimeFormat {
    date: Option<&'static str>,
    time: Option<&'static str>,
}

impl PatternDateTimeFormat {
    fn for_locale(locale: &LanguageIdentifier, options: DateTimeOptions) -> Self {
        let english = locale.language.as_str() == "en";
        let day_first = english
            && locale
                .region
                .is_some_and(|region| !matches!(region.as_str(), "US" | "CA" | "PH"));
        let date = options.date_style.map(|style| match (english, day_first, style) {
            (true, false, DateTimeStyle::Short) => "%-m/%-d/%y",
            (true, false, DateTimeStyle::Medium) => "%b %-d, %Y",
            (true, false, DateTimeStyle::Long) => "%B %-d, %Y",
            (true, true, DateTimeStyle::Short) => "%d/%m/%Y",
            (true, true, DateTimeStyle::Medium) => "%-d %b %Y",
            (true, true, DateTimeStyle::Long) => "%-d %B %Y",
            (false, _, DateTimeStyle::Short) => "%d.%m.%y",
            (false, _, DateTimeStyle::Medium | DateTimeStyle::Long) => "%d.%m.%Y",
        });
        let twelve_hour = english && !day_first;
        let time = options.time_style.map(|style| match (twelve_hour, style) {
            (true, DateTimeStyle::Short) => "%-I:%M %p",
            (true, DateTimeStyle::Medium) => "%-I:%M:%S %p",
            (true, DateTimeStyle::Long) => "%-I:%M:%S %p UTC",
            (false, DateTimeStyle::Short) => "%H:%M",
            (false, DateTimeStyle::Medium) => "%H:%M:%S",
            (false, DateTimeStyle::Long) => "%H:%M:%S UTC",
        });
        Self { date, time }
    }
}

impl DateTimeFormat for PatternDateTimeFormat {
    fn format(&self, at: DateTime<Utc>) -> String {
        match (self.date, self.time) {
            (Some(date), Some(time)) => format!("{}, {}", at.format(date), at.format(time)),
            (Some(pattern), None) | (None, Some(pattern)) => at.format(pattern).to_string(),
            (None, None) => at.format("%-m/%-d/%Y").to_string(),
        }
    }
}
