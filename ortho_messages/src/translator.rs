//! Key-based translation over a message tree.
//!
//! A [`Translator`] binds a tree, a locale, and an optional namespace, then
//! offers four ways to read a message: formatted as text ([`Translator::t`]),
//! formatted with rich markup ([`Translator::rich`]), formatted with
//! string-producing markup ([`Translator::markup`]), and unformatted
//! ([`Translator::raw`]).
//!
//! Missing keys are not errors: they resolve to a label built from the
//! namespace and key, which makes untranslated strings easy to spot in a UI.

use std::fmt;
use std::sync::Arc;

use unic_langid::LanguageIdentifier;

use crate::format::MessageFormatter;
use crate::locale::{Direction, text_direction};
use crate::output::Formatted;
use crate::tree::{MessageTree, MessageValue, get_nested_message};
use crate::value::Values;

/// Translation functions bound to one locale and namespace.
///
/// Construction resolves the namespace once; translators are cheap to build
/// and clone, so callers may create one per request.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::{MessageTree, Translator, Values};
/// use unic_langid::langid;
///
/// let ns: MessageTree = [("greet", "Hello {name}")].into_iter().collect();
/// let tree: MessageTree = [("ns", ns)].into_iter().collect();
///
/// let t = Translator::new(&tree, langid!("en"), Some("ns"));
/// assert_eq!(t.t("greet", &Values::new().with("name", "Joel")), "Hello Joel");
/// assert_eq!(t.t("missing", &Values::new()), "ns.missing");
/// ```
#[derive(Clone)]
pub struct Translator {
    scope: Option<MessageTree>,
    namespace: Option<String>,
    locale: LanguageIdentifier,
    formatter: Arc<MessageFormatter>,
}

impl Translator {
    /// Binds `tree` to `locale`, scoped to the subtree at `namespace`.
    ///
    /// An empty namespace is the same as none. A namespace that does not
    /// resolve to a subtree makes every key miss.
    #[must_use]
    pub fn new(tree: &MessageTree, locale: LanguageIdentifier, namespace: Option<&str>) -> Self {
        let namespace = namespace.filter(|ns| !ns.is_empty());
        let scope = match namespace {
            Some(ns) => get_nested_message(tree, ns)
                .and_then(MessageValue::as_tree)
                .cloned(),
            None => Some(tree.clone()),
        };
        Self {
            scope,
            namespace: namespace.map(str::to_owned),
            locale,
            formatter: Arc::new(MessageFormatter::shared().clone()),
        }
    }

    /// Uses `formatter` instead of the shared process-wide formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<MessageFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Formats the message at `key` as plain text.
    ///
    /// Non-text leaves (numbers, booleans, lists, subtrees) are stringified
    /// without interpolation. Missing keys yield the fallback label.
    #[must_use]
    pub fn t<C: Clone + fmt::Display>(&self, key: &str, values: &Values<C>) -> String {
        match self.lookup(key) {
            Some(MessageValue::Text(template)) => {
                self.formatter.format_plain(template, values, &self.locale)
            }
            Some(other) => other.to_string(),
            None => self.fallback_label(key),
        }
    }

    /// Formats the message at `key` with rich markup.
    ///
    /// Keys that are missing or not text yield the fallback label as text.
    #[must_use]
    pub fn rich<C: Clone + fmt::Display>(&self, key: &str, values: &Values<C>) -> Formatted<C> {
        match self.lookup(key) {
            Some(MessageValue::Text(template)) => {
                self.formatter.format_rich(template, values, &self.locale)
            }
            _ => Formatted::Text(self.fallback_label(key)),
        }
    }

    /// Formats the message at `key` with markup and joins the result.
    ///
    /// Intended for [`Renderer::markup`](crate::Renderer::markup) callbacks
    /// that produce strings; any content chunks are stringified.
    #[must_use]
    pub fn markup<C: Clone + fmt::Display>(&self, key: &str, values: &Values<C>) -> String {
        self.rich(key, values).into_string()
    }

    /// Returns the stored value at `key` without formatting.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&MessageValue> {
        self.lookup(key)
    }

    /// Namespace this translator is scoped to.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Locale messages are formatted for.
    #[must_use]
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Writing direction of the locale.
    #[must_use]
    pub fn direction(&self) -> Direction {
        text_direction(&self.locale.to_string())
    }

    fn lookup(&self, key: &str) -> Option<&MessageValue> {
        self.scope
            .as_ref()
            .and_then(|scope| get_nested_message(scope, key))
    }

    fn fallback_label(&self, key: &str) -> String {
        self.namespace
            .as_deref()
            .map_or_else(|| key.to_owned(), |ns| format!("{ns}.{key}"))
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("namespace", &self.namespace)
            .field("locale", &self.locale.to_string())
            .field("resolved", &self.scope.is_some())
            .finish_non_exhaustive()
    }
}

/// Builds a [`Translator`] for `tree`, `locale`, and an optional namespace.
#[must_use]
pub fn translations(
    tree: &MessageTree,
    locale: LanguageIdentifier,
    namespace: Option<&str>,
) -> Translator {
    Translator::new(tree, locale, namespace)
}
