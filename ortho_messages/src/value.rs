//! Placeholder values supplied to a format call.
//!
//! A [`Values`] map binds placeholder and tag names to [`Value`]s. The content
//! parameter `C` is the host framework's opaque renderable unit (a UI node, an
//! HTML fragment, ...); the formatter never looks inside it and only needs to
//! clone it and, when flattening to plain text, display it.

use std::collections::HashMap;
use std::fmt;
use std::num::FpCategory;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::RenderError;
use crate::output::Formatted;

/// Output of a tag [`Renderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<C> {
    /// Plain text, as produced by markup renderers.
    Text(String),
    /// An opaque content value.
    Content(C),
}

type RenderFn<C> = dyn Fn(Option<Formatted<C>>) -> Result<Rendered<C>, RenderError> + Send + Sync;

/// Callback invoked for markup tags in rich mode.
///
/// Self-closing tags (`<br/>`) receive `None`; paired tags receive their
/// already formatted children.
pub struct Renderer<C> {
    render: Arc<RenderFn<C>>,
}

impl<C> Renderer<C> {
    /// Wraps a fallible render callback.
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(Option<Formatted<C>>) -> Result<Rendered<C>, RenderError> + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(render),
        }
    }

    /// Wraps a callback that always produces opaque content.
    pub fn content<F>(render: F) -> Self
    where
        C: 'static,
        F: Fn(Option<Formatted<C>>) -> C + Send + Sync + 'static,
    {
        Self::new(move |children| Ok(Rendered::Content(render(children))))
    }

    /// Invokes the callback.
    ///
    /// # Errors
    ///
    /// Propagates the [`RenderError`] returned by the callback.
    pub fn render(&self, children: Option<Formatted<C>>) -> Result<Rendered<C>, RenderError> {
        (self.render)(children)
    }
}

impl<C: fmt::Display + 'static> Renderer<C> {
    /// Wraps a string-producing callback, as used by markup translation.
    ///
    /// The children are flattened to a string before the callback runs;
    /// self-closing tags receive an empty string.
    pub fn markup<F>(render: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(move |children: Option<Formatted<C>>| {
            let text = children.map(|formatted| formatted.to_string()).unwrap_or_default();
            Ok(Rendered::Text(render(&text)))
        })
    }
}

impl<C> Clone for Renderer<C> {
    fn clone(&self) -> Self {
        Self {
            render: Arc::clone(&self.render),
        }
    }
}

impl<C> fmt::Debug for Renderer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer").field("render", &"<callback>").finish()
    }
}

/// A value bound to a placeholder or tag name.
#[derive(Debug, Clone)]
pub enum Value<C> {
    /// Text substituted verbatim.
    Text(String),
    /// A number.
    Number(f64),
    /// A boolean.
    Bool(bool),
    /// A point in time, used by `date` and `time` arguments.
    Date(DateTime<Utc>),
    /// Opaque content passed through untouched in rich mode.
    Content(C),
    /// A tag renderer (rich mode only).
    Renderer(Renderer<C>),
    /// A sequence of values; in rich mode each element becomes its own chunk.
    List(Vec<Self>),
}

impl<C: fmt::Display> Value<C> {
    /// Stringifies the value for plain substitution and select matching.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number_to_string(*number),
            Self::Bool(flag) => flag.to_string(),
            Self::Date(at) => at.to_rfc3339(),
            Self::Content(content) => content.to_string(),
            Self::Renderer(_) => String::new(),
            Self::List(items) => items
                .iter()
                .map(Self::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl<C> Value<C> {
    /// Coerces the value to a number for `{name, number}` arguments.
    ///
    /// Blank text counts as zero; unparseable text and values without a
    /// numeric reading yield `NaN`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "epoch milliseconds stay well inside f64's exact integer range"
    )]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(number) => *number,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Self::Bool(flag) => f64::from(u8::from(*flag)),
            Self::Date(at) => at.timestamp_millis() as f64,
            Self::Content(_) | Self::Renderer(_) | Self::List(_) => f64::NAN,
        }
    }

    /// Whether the value counts as set: empty text, zero, `NaN`, and `false`
    /// do not.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(number) => {
                !matches!(number.classify(), FpCategory::Zero | FpCategory::Nan)
            }
            Self::Bool(flag) => *flag,
            Self::Date(_) | Self::Content(_) | Self::Renderer(_) | Self::List(_) => true,
        }
    }

    /// Returns the plural operand: numbers as-is, everything else zero.
    #[must_use]
    pub const fn plural_operand(&self) -> f64 {
        match self {
            Self::Number(number) => *number,
            _ => 0.0,
        }
    }

    /// Coerces the value to a timestamp for `date` and `time` arguments.
    ///
    /// Numbers are epoch milliseconds, booleans count as `0` or `1`
    /// milliseconds, blank text is the epoch, and other text must be RFC 3339
    /// or a plain `YYYY-MM-DD` date (read as UTC midnight). Returns `None`
    /// when no valid instant can be derived.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "fractional milliseconds are dropped like any date library would"
    )]
    pub fn to_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(at) => Some(*at),
            Self::Number(millis) if millis.is_finite() => {
                DateTime::from_timestamp_millis(millis.trunc() as i64)
            }
            Self::Bool(flag) => DateTime::from_timestamp_millis(i64::from(*flag)),
            Self::Text(text) => parse_date_text(text.trim()),
            Self::Number(_) | Self::Content(_) | Self::Renderer(_) | Self::List(_) => None,
        }
    }
}

impl<C> From<&str> for Value<C> {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<C> From<String> for Value<C> {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<C> From<f64> for Value<C> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<C> From<bool> for Value<C> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<C> From<DateTime<Utc>> for Value<C> {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<C> From<Renderer<C>> for Value<C> {
    fn from(value: Renderer<C>) -> Self {
        Self::Renderer(value)
    }
}

impl<C> From<Vec<Value<C>>> for Value<C> {
    fn from(value: Vec<Value<C>>) -> Self {
        Self::List(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<C> From<$ty> for Value<C> {
                fn from(value: $ty) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, u8, u16, u32);

/// Named values available to a single format call.
///
/// `Values::new()` creates a map for plain-text callers; rich callers name
/// their content type, e.g. `Values::<Node>::default()`.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::Values;
///
/// let values = Values::new().with("name", "World").with("count", 3);
/// assert!(values.get("name").is_some());
/// assert!(values.get("missing").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Values<C = String> {
    entries: HashMap<String, Value<C>>,
}

impl<C> Default for Values<C> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl Values {
    /// Creates an empty map of plain values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C> Values<C> {
    /// Adds a value and returns the map, for builder-style construction.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value<C>>) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds `value` to `name`, returning the previous binding.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value<C>>,
    ) -> Option<Value<C>> {
        self.entries.insert(name.into(), value.into())
    }

    /// Binds opaque content to `name`.
    #[must_use]
    pub fn with_content(self, name: impl Into<String>, content: C) -> Self {
        self.with(name, Value::Content(content))
    }

    /// Binds a tag renderer to `name`.
    #[must_use]
    pub fn with_renderer(self, name: impl Into<String>, renderer: Renderer<C>) -> Self {
        self.with(name, Value::Renderer(renderer))
    }

    /// Looks up the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value<C>> {
        self.entries.get(name)
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no names are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C, K, V> FromIterator<(K, V)> for Values<C>
where
    K: Into<String>,
    V: Into<Value<C>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return DateTime::from_timestamp_millis(0);
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Renders a number the way message catalogues expect to see it when it is
/// substituted without locale formatting: integers without a fraction,
/// `NaN`, signed `Infinity`, and no negative zero.
#[must_use]
pub fn number_to_string(number: f64) -> String {
    match number.classify() {
        FpCategory::Nan => "NaN".to_owned(),
        FpCategory::Infinite if number.is_sign_negative() => "-Infinity".to_owned(),
        FpCategory::Infinite => "Infinity".to_owned(),
        FpCategory::Zero => "0".to_owned(),
        FpCategory::Normal | FpCategory::Subnormal => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    type PlainValue = Value<String>;

    #[rstest]
    #[case::integer(PlainValue::Number(1234.0), "1234")]
    #[case::fraction(PlainValue::Number(-0.25), "-0.25")]
    #[case::negative_zero(PlainValue::Number(-0.0), "0")]
    #[case::nan(PlainValue::Number(f64::NAN), "NaN")]
    #[case::infinity(PlainValue::Number(f64::NEG_INFINITY), "-Infinity")]
    #[case::boolean(PlainValue::Bool(false), "false")]
    #[case::content(PlainValue::Content("<b>x</b>".to_owned()), "<b>x</b>")]
    #[case::list(PlainValue::List(vec!["a".into(), 1.into()]), "a,1")]
    #[case::renderer(PlainValue::Renderer(Renderer::markup(str::to_owned)), "")]
    fn stringifies_values(#[case] value: PlainValue, #[case] expected: &str) {
        assert_eq!(value.to_text(), expected);
    }

    #[rstest]
    #[case::number(PlainValue::Number(2.5), Some(2.5))]
    #[case::numeric_text(PlainValue::Text(" 12 ".to_owned()), Some(12.0))]
    #[case::blank_text(PlainValue::Text(String::new()), Some(0.0))]
    #[case::garbage_text(PlainValue::Text("twelve".to_owned()), None)]
    #[case::truthy(PlainValue::Bool(true), Some(1.0))]
    #[case::list(PlainValue::List(Vec::new()), None)]
    fn coerces_numbers(#[case] value: PlainValue, #[case] expected: Option<f64>) {
        let number = value.to_number();
        match expected {
            Some(expected_number) => assert!((number - expected_number).abs() < f64::EPSILON),
            None => assert!(number.is_nan()),
        }
    }

    #[rstest]
    #[case::empty_text(PlainValue::Text(String::new()), false)]
    #[case::text(PlainValue::Text("0".to_owned()), true)]
    #[case::zero(PlainValue::Number(-0.0), false)]
    #[case::nan(PlainValue::Number(f64::NAN), false)]
    #[case::number(PlainValue::Number(0.5), true)]
    #[case::falsy_flag(PlainValue::Bool(false), false)]
    #[case::empty_list(PlainValue::List(Vec::new()), true)]
    fn reports_truthiness(#[case] value: PlainValue, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    fn plural_operand_ignores_non_numbers() {
        assert!(PlainValue::Text("5".to_owned()).plural_operand().abs() < f64::EPSILON);
        assert!((PlainValue::Number(5.0).plural_operand() - 5.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn coerces_dates() {
        let expected = Utc
            .with_ymd_and_hms(2024, 1, 2, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let from_text = PlainValue::Text("2024-01-02T12:00:00.000Z".to_owned()).to_date();
        let from_millis = PlainValue::Number(1_704_196_800_000.0).to_date();
        assert_eq!(from_text, Some(expected));
        assert_eq!(from_millis, Some(expected));
        assert_eq!(PlainValue::Text("yesterday".to_owned()).to_date(), None);
        assert_eq!(PlainValue::Number(f64::NAN).to_date(), None);
    }

    #[rstest]
    fn coerces_loose_dates() {
        let midnight = Utc
            .with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(PlainValue::Text("2024-01-02".to_owned()).to_date(), Some(midnight));
        assert_eq!(
            PlainValue::Text("  ".to_owned()).to_date(),
            DateTime::from_timestamp_millis(0)
        );
        assert_eq!(
            PlainValue::Bool(true).to_date(),
            DateTime::from_timestamp_millis(1)
        );
    }

    #[rstest]
    fn markup_renderer_flattens_children() {
        let renderer: Renderer<String> = Renderer::markup(|inner| format!("<i>{inner}</i>"));
        let rendered = renderer
            .render(Some(Formatted::Text("hi".to_owned())))
            .expect("markup renderer is infallible");
        assert_eq!(rendered, Rendered::Text("<i>hi</i>".to_owned()));
        let empty = renderer.render(None).expect("markup renderer is infallible");
        assert_eq!(empty, Rendered::Text("<i></i>".to_owned()));
    }

    #[rstest]
    fn builder_replaces_existing_bindings() {
        let mut values = Values::new().with("name", "Ada");
        let previous = values.insert("name", "Grace");
        assert!(matches!(previous, Some(Value::Text(text)) if text == "Ada"));
        assert_eq!(values.len(), 1);
    }
}
