//! Locale-aware message formatting with ICU-style arguments and markup tags.
//!
//! Templates interpolate `{name}` placeholders, format `{n, number}`,
//! `{d, date}`, and `{d, time}` arguments through a locale, choose branches
//! with `plural`, `selectordinal`, and `select`, and, in rich mode, hand
//! `<tag>children</tag>` markup to caller-supplied renderers. Malformed input
//! never fails: it is kept as literal text.
//!
//! Translation catalogues are [`MessageTree`]s addressed with dotted keys. A
//! [`Translator`] binds a tree to a locale and an optional namespace.
//!
//! ```rust
//! use ortho_messages::{MessageTree, Renderer, Values, translations};
//! use unic_langid::langid;
//!
//! let tree = MessageTree::from_json_str(
//!     r#"{"inbox": {"unread": "You have {count, plural, one {# message} other {# messages}}",
//!                   "help": "Read the <link>guide</link>"}}"#,
//! )?;
//! let t = translations(&tree, langid!("en"), Some("inbox"));
//!
//! assert_eq!(t.t("unread", &Values::new().with("count", 1200)), "You have 1,200 messages");
//!
//! let values = Values::new().with_renderer(
//!     "link",
//!     Renderer::markup(|inner| format!("<a href=\"/guide\">{inner}</a>")),
//! );
//! assert_eq!(t.markup("help", &values), "Read the <a href=\"/guide\">guide</a>");
//! assert_eq!(t.t("absent", &Values::new()), "inbox.absent");
//! # Ok::<(), ortho_messages::TreeError>(())
//! ```

mod cache;
mod config;
mod error;
mod format;
mod locale;
mod output;
pub mod syntax;
mod translator;
mod tree;
mod value;

pub use cache::FormatterCache;
pub use config::{DEFAULT_MAX_DEPTH, ENV_PREFIX, FormatterConfig};
#[cfg(feature = "serde_json")]
pub use error::TreeError;
pub use error::{BoxedError, CapabilityError, ConfigError, RenderError};
pub use format::{INVALID_DATE, MessageFormatter, format_message};
pub use locale::{
    BuiltinLocaleServices, DateTimeFormat, DateTimeOptions, DateTimeStyle, Direction,
    LocaleServices, NumberFormat, PluralCategory, PluralKind, text_direction,
};
pub use output::{Chunk, Formatted, Mode, collapse, join};
pub use translator::{Translator, translations};
pub use tree::{MessageTree, MessageValue, get_nested_message};
pub use value::{Rendered, Renderer, Value, Values, number_to_string};
