//! Writing direction of a locale.

use std::fmt;

/// Languages written right to left, keyed by primary language subtag.
const RTL_LANGUAGES: &[&str] = &[
    "ae",  // Avestan
    "ar",  // Arabic
    "arc", // Aramaic
    "bcc", // Southern Balochi
    "bqi", // Bakhtiari
    "ckb", // Sorani
    "dv",  // Dhivehi
    "fa",  // Persian
    "glk", // Gilaki
    "he",  // Hebrew
    "ku",  // Kurdish
    "mzn", // Mazanderani
    "nqo", // N'Ko
    "pnb", // Western Punjabi
    "prs", // Dari
    "ps",  // Pashto
    "sd",  // Sindhi
    "ug",  // Uyghur
    "ur",  // Urdu
    "yi",  // Yiddish
];

/// Base writing direction, as used for an HTML `dir` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// Returns `"ltr"` or `"rtl"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determines the writing direction of a locale tag.
///
/// Accepts `ar`, `ar-EG`, `ar_EG`, and longer tags such as `zh-Hant-TW`. Only
/// the primary language subtag is inspected, case-insensitively. The tag
/// need not be well formed; anything unrecognised is left to right.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::{Direction, text_direction};
///
/// assert_eq!(text_direction("ar_EG"), Direction::Rtl);
/// assert_eq!(text_direction("en-GB"), Direction::Ltr);
/// ```
#[must_use]
pub fn text_direction(locale_tag: &str) -> Direction {
    let language = locale_tag
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if RTL_LANGUAGES.contains(&language.as_str()) {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}
