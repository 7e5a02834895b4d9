//! The message interpreter.
//!
//! [`MessageFormatter`] walks the nodes produced by [`crate::syntax::parse`]
//! and turns them into output chunks. Formatting never fails: missing values
//! substitute as empty text, failing renderers fall back to the unrendered
//! markup, and a capability that cannot classify a plural falls back to the
//! `other` branch.

use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::DateTime;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

use crate::cache::FormatterCache;
use crate::config::FormatterConfig;
use crate::locale::{DateTimeOptions, LocaleServices, PluralCategory};
use crate::output::{Chunk, Formatted, Mode, collapse};
use crate::syntax::{
    self, Argument, ArgumentKind, Node, PairedTag, PluralArgument, SelfClosingTag,
    substitute_hash,
};
use crate::value::{Rendered, Value, Values, number_to_string};

/// Text emitted for `date`/`time` arguments whose value is not a valid instant.
pub const INVALID_DATE: &str = "Invalid Date";

/// Selector used by `select` when the value is missing.
const MISSING_SELECTOR: &str = "undefined";

static SHARED: LazyLock<MessageFormatter> = LazyLock::new(MessageFormatter::default);

/// Formats templates against values for a locale.
///
/// A formatter is cheap to clone and safe to share between threads; clones
/// share one [`FormatterCache`].
///
/// # Examples
///
/// ```rust
/// use ortho_messages::{MessageFormatter, Values};
/// use unic_langid::langid;
///
/// let formatter = MessageFormatter::default();
/// let values = Values::new().with("count", 2);
/// let text = formatter.format_plain(
///     "{count, plural, one {# file} other {# files}}",
///     &values,
///     &langid!("en"),
/// );
/// assert_eq!(text, "2 files");
/// ```
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    cache: Arc<FormatterCache>,
    config: FormatterConfig,
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(Arc::new(FormatterCache::builtin()), FormatterConfig::default())
    }
}

impl MessageFormatter {
    /// Creates a formatter over an existing cache.
    #[must_use]
    pub const fn new(cache: Arc<FormatterCache>, config: FormatterConfig) -> Self {
        Self { cache, config }
    }

    /// Creates a formatter with a fresh cache over `services`.
    #[must_use]
    pub fn with_services(services: Arc<dyn LocaleServices>) -> Self {
        Self::new(
            Arc::new(FormatterCache::new(services)),
            FormatterConfig::default(),
        )
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: FormatterConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the process-wide formatter used by [`format_message`].
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Formatter cache backing this formatter.
    #[must_use]
    pub fn cache(&self) -> &FormatterCache {
        &self.cache
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Formats `template` in the given mode.
    ///
    /// Plain mode always yields [`Formatted::Text`]. Rich mode yields text
    /// when the output is a single string and a chunk sequence otherwise.
    #[must_use]
    pub fn format<C: Clone + fmt::Display>(
        &self,
        template: &str,
        values: &Values<C>,
        locale: &LanguageIdentifier,
        mode: Mode,
    ) -> Formatted<C> {
        Interpreter {
            formatter: self,
            values,
            locale,
            mode,
        }
        .format(template, 0)
    }

    /// Formats `template` in plain mode.
    #[must_use]
    pub fn format_plain<C: Clone + fmt::Display>(
        &self,
        template: &str,
        values: &Values<C>,
        locale: &LanguageIdentifier,
    ) -> String {
        self.format(template, values, locale, Mode::Plain).into_string()
    }

    /// Formats `template` in rich mode.
    #[must_use]
    pub fn format_rich<C: Clone + fmt::Display>(
        &self,
        template: &str,
        values: &Values<C>,
        locale: &LanguageIdentifier,
    ) -> Formatted<C> {
        self.format(template, values, locale, Mode::Rich)
    }
}

/// Formats `template` with the shared process-wide formatter.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::{Mode, Values, format_message};
/// use unic_langid::langid;
///
/// let values = Values::new().with("name", "World");
/// let text = format_message("Hello {name}", &values, &langid!("en"), Mode::Plain);
/// assert_eq!(text.as_text(), Some("Hello World"));
/// ```
#[must_use]
pub fn format_message<C: Clone + fmt::Display>(
    template: &str,
    values: &Values<C>,
    locale: &LanguageIdentifier,
    mode: Mode,
) -> Formatted<C> {
    MessageFormatter::shared().format(template, values, locale, mode)
}

struct Interpreter<'a, C> {
    formatter: &'a MessageFormatter,
    values: &'a Values<C>,
    locale: &'a LanguageIdentifier,
    mode: Mode,
}

impl<C: Clone + fmt::Display> Interpreter<'_, C> {
    /// `depth` counts the plural/select branches enclosing `template`. Tags
    /// share the same limit: a sub-template at `depth` may nest paired tags
    /// `max_depth - depth` levels deep.
    fn format(&self, template: &str, depth: usize) -> Formatted<C> {
        if template.is_empty() {
            return Formatted::Text(String::new());
        }
        let limit = self.formatter.config.max_depth;
        if depth > limit {
            warn!(depth, limit, "message nesting too deep; emitting branch literally");
            return Formatted::Text(template.to_owned());
        }
        let nodes = syntax::parse_with_depth(template, self.mode, limit - depth);
        collapse(self.render(&nodes, depth), self.mode)
    }

    fn render(&self, nodes: &[Node], depth: usize) -> Vec<Chunk<C>> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Node::Text(text) => out.push(Chunk::Text(text.clone())),
                Node::Argument(argument) => self.argument(argument, depth, &mut out),
                Node::SelfClosingTag(tag) => self.self_closing(tag, &mut out),
                Node::PairedTag(tag) => self.paired(tag, depth, &mut out),
            }
        }
        out
    }

    fn argument(&self, argument: &Argument, depth: usize, out: &mut Vec<Chunk<C>>) {
        let value = self.values.get(&argument.key);
        match &argument.kind {
            ArgumentKind::Simple => self.simple(value, argument.position, out),
            ArgumentKind::Number => {
                let number = value
                    .filter(|set| set.is_truthy())
                    .map_or(0.0, Value::to_number);
                out.push(Chunk::Text(self.number(number)));
            }
            ArgumentKind::Date => {
                out.push(Chunk::Text(self.date(value, &DateTimeOptions::MEDIUM_DATE)));
            }
            ArgumentKind::Time => {
                out.push(Chunk::Text(self.date(value, &DateTimeOptions::MEDIUM_TIME)));
            }
            ArgumentKind::Plural(plural) => {
                let branch = self.plural_branch(plural, value);
                self.splice_branch(&branch, depth, out);
            }
            ArgumentKind::Select(branches) => {
                let selector = value.map_or_else(|| MISSING_SELECTOR.to_owned(), Value::to_text);
                let branch = branches
                    .first_of([selector.as_str(), "other"])
                    .unwrap_or_default();
                self.splice_branch(branch, depth, out);
            }
        }
    }

    fn simple(&self, value: Option<&Value<C>>, position: usize, out: &mut Vec<Chunk<C>>) {
        match (self.mode, value) {
            (Mode::Rich, Some(Value::Content(content))) => out.push(Chunk::Content {
                key: position.to_string(),
                content: content.clone(),
            }),
            (Mode::Rich, Some(Value::List(items))) => {
                out.extend(items.iter().enumerate().map(|(idx, item)| match item {
                    Value::Content(content) => Chunk::Content {
                        key: format!("{position}-{idx}"),
                        content: content.clone(),
                    },
                    other => Chunk::Text(other.to_text()),
                }));
            }
            _ => out.push(Chunk::Text(value.map(Value::to_text).unwrap_or_default())),
        }
    }

    fn number(&self, number: f64) -> String {
        self.formatter.cache.number_format(self.locale).format(number)
    }

    fn date(&self, value: Option<&Value<C>>, options: &DateTimeOptions) -> String {
        let instant = value
            .filter(|set| set.is_truthy())
            .map_or_else(|| DateTime::from_timestamp_millis(0), Value::to_date);
        instant.map_or_else(
            || INVALID_DATE.to_owned(),
            |at| {
                self.formatter
                    .cache
                    .date_time_format(self.locale, options)
                    .format(at)
            },
        )
    }

    /// Selects the branch for a plural argument and substitutes `#`.
    #[expect(
        clippy::float_arithmetic,
        reason = "the plural offset is subtracted from the operand"
    )]
    fn plural_branch(&self, plural: &PluralArgument, value: Option<&Value<C>>) -> String {
        let number = value.map_or(0.0, Value::plural_operand) - plural.offset;
        let exact = format!("={}", number_to_string(number));
        let category = self
            .formatter
            .cache
            .plural_category(self.locale, plural.kind, number)
            .unwrap_or_else(|err| {
                debug!(
                    locale = %self.locale,
                    error = %err,
                    "plural category unavailable; using other"
                );
                PluralCategory::Other
            });
        let branch = plural
            .branches
            .first_of([exact.as_str(), category.as_str(), "other"])
            .unwrap_or_default();
        substitute_hash(branch, &self.number(number))
    }

    fn splice_branch(&self, branch: &str, depth: usize, out: &mut Vec<Chunk<C>>) {
        splice(self.format(branch, depth + 1), out);
    }

    fn self_closing(&self, tag: &SelfClosingTag, out: &mut Vec<Chunk<C>>) {
        match self.values.get(&tag.name) {
            Some(Value::Renderer(renderer)) => match renderer.render(None) {
                Ok(rendered) => out.push(keyed(rendered, tag.position)),
                Err(err) => {
                    warn!(tag = %tag.name, error = %err, "failed to render message tag");
                    out.push(Chunk::Text(tag.source.clone()));
                }
            },
            Some(Value::Content(content)) => out.push(Chunk::Content {
                key: tag.position.to_string(),
                content: content.clone(),
            }),
            Some(set) if set.is_truthy() => {}
            _ => out.push(Chunk::Text(tag.source.clone())),
        }
    }

    fn paired(&self, tag: &PairedTag, depth: usize, out: &mut Vec<Chunk<C>>) {
        let children = collapse(self.render(&tag.children, depth), self.mode);
        let Some(Value::Renderer(renderer)) = self.values.get(&tag.name) else {
            splice_rekeyed(children, tag.position, out);
            return;
        };
        match renderer.render(Some(children.clone())) {
            Ok(rendered) => out.push(keyed(rendered, tag.position)),
            Err(err) => {
                warn!(tag = %tag.name, error = %err, "failed to render message tag");
                splice(children, out);
            }
        }
    }
}

fn keyed<C>(rendered: Rendered<C>, position: usize) -> Chunk<C> {
    match rendered {
        Rendered::Text(text) => Chunk::Text(text),
        Rendered::Content(content) => Chunk::Content {
            key: position.to_string(),
            content,
        },
    }
}

/// Appends a sub-result. Text is kept even when empty.
fn splice<C>(formatted: Formatted<C>, out: &mut Vec<Chunk<C>>) {
    match formatted {
        Formatted::Text(text) => out.push(Chunk::Text(text)),
        Formatted::Chunks(chunks) => out.extend(chunks),
    }
}

/// Appends tag children, keying content by tag position and child index.
fn splice_rekeyed<C>(children: Formatted<C>, position: usize, out: &mut Vec<Chunk<C>>) {
    match children {
        Formatted::Text(text) => out.push(Chunk::Text(text)),
        Formatted::Chunks(chunks) => {
            out.extend(chunks.into_iter().enumerate().map(|(idx, chunk)| match chunk {
                Chunk::Content { content, .. } => Chunk::Content {
                    key: format!("{position}-{idx}"),
                    content,
                },
                text @ Chunk::Text(_) => text,
            }));
        }
    }
}
