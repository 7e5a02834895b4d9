//! Rich formatting with a host content type and custom locale services.

use std::fmt;
use std::io;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ortho_messages::{
    CapabilityError, Chunk, DateTimeFormat, DateTimeOptions, Formatted, LocaleServices,
    MessageFormatter, MessageTree, NumberFormat, PluralCategory, PluralKind, RenderError,
    Renderer, Value, Values, translations,
};
use rstest::{fixture, rstest};
use unic_langid::{LanguageIdentifier, langid};

/// Stand-in for a UI framework node.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Link { href: &'static str, label: String },
    Icon(&'static str),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link { href, label } => write!(f, "[{label}]({href})"),
            Self::Icon(name) => write!(f, ":{name}:"),
        }
    }
}

fn text(value: &str) -> Chunk<Node> {
    Chunk::Text(value.to_owned())
}

fn content(key: &str, node: Node) -> Chunk<Node> {
    Chunk::Content {
        key: key.to_owned(),
        content: node,
    }
}

fn link_renderer() -> Renderer<Node> {
    Renderer::content(|children: Option<Formatted<Node>>| Node::Link {
        href: "/docs",
        label: children.map(|inner| inner.to_string()).unwrap_or_default(),
    })
}

#[fixture]
fn catalogue() -> MessageTree {
    let help: MessageTree = [
        ("docs", "Read the <link>docs</link> now"),
        ("saved", "{icon} Saved"),
        ("shared", "Shared with {people}"),
    ]
    .into_iter()
    .collect();
    [("help", help)].into_iter().collect()
}

#[rstest]
fn renderer_output_is_keyed_by_tag_position(catalogue: MessageTree) {
    let t = translations(&catalogue, langid!("en"), Some("help"));
    let values = Values::default().with_renderer("link", link_renderer());
    let expected = vec![
        text("Read the "),
        content(
            "9",
            Node::Link {
                href: "/docs",
                label: "docs".to_owned(),
            },
        ),
        text(" now"),
    ];
    assert_eq!(t.rich("docs", &values), Formatted::Chunks(expected));
    assert_eq!(t.markup("docs", &values), "Read the [docs](/docs) now");
}

#[rstest]
fn content_values_pass_through(catalogue: MessageTree) {
    let t = translations(&catalogue, langid!("en"), Some("help"));
    let values = Values::default().with_content("icon", Node::Icon("check"));
    assert_eq!(
        t.rich("saved", &values),
        Formatted::Chunks(vec![content("0", Node::Icon("check")), text(" Saved")])
    );
    assert_eq!(t.t("saved", &values), ":check: Saved");
}

#[rstest]
fn list_elements_get_distinct_keys(catalogue: MessageTree) {
    let t = translations(&catalogue, langid!("en"), Some("help"));
    let people = vec![
        Value::Content(Node::Icon("ana")),
        Value::from(" & "),
        Value::Content(Node::Icon("bo")),
    ];
    let values = Values::default().with("people", people);
    let Formatted::Chunks(chunks) = t.rich("shared", &values) else {
        panic!("expected chunked output");
    };
    let keys: Vec<&str> = chunks
        .iter()
        .filter_map(|chunk| match chunk {
            Chunk::Content { key, .. } => Some(key.as_str()),
            Chunk::Text(_) => None,
        })
        .collect();
    assert_eq!(keys, ["12-0", "12-2"]);
}

#[rstest]
fn failing_renderer_keeps_children(catalogue: MessageTree) {
    let t = translations(&catalogue, langid!("en"), Some("help"));
    let values = Values::<Node>::default().with_renderer(
        "link",
        Renderer::new(|_| {
            Err(RenderError::from_source(io::Error::other(
                "renderer unavailable",
            )))
        }),
    );
    assert_eq!(
        t.rich("docs", &values),
        Formatted::Chunks(vec![text("Read the "), text("docs"), text(" now")])
    );
    assert_eq!(t.markup("docs", &values), "Read the docs now");
}

/// Locale services that answer every question the same way.
struct FixedServices;

impl LocaleServices for FixedServices {
    fn plural_category(
        &self,
        _locale: &LanguageIdentifier,
        _kind: PluralKind,
        _number: f64,
    ) -> Result<PluralCategory, CapabilityError> {
        Ok(PluralCategory::One)
    }

    fn number_format(&self, _locale: &LanguageIdentifier) -> Arc<dyn NumberFormat> {
        Arc::new(|number: f64| format!("#{number}"))
    }

    fn date_time_format(
        &self,
        _locale: &LanguageIdentifier,
        _options: &DateTimeOptions,
    ) -> Arc<dyn DateTimeFormat> {
        Arc::new(|at: DateTime<Utc>| format!("t{}", at.timestamp()))
    }
}

#[rstest]
fn custom_services_drive_formatting() {
    let formatter = Arc::new(MessageFormatter::with_services(Arc::new(FixedServices)));
    let tree: MessageTree = [
        ("count", "{n, plural, one {just #} other {# items}}"),
        ("stamp", "{at, date}"),
    ]
    .into_iter()
    .collect();
    let t = translations(&tree, langid!("en"), None).with_formatter(Arc::clone(&formatter));
    let values = Values::new()
        .with("n", 5)
        .with("at", DateTime::<Utc>::from_timestamp(60, 0).unwrap_or_default());
    assert_eq!(t.t("count", &values), "just #5");
    assert_eq!(t.t("stamp", &values), "t60");
    assert_eq!(formatter.cache().number_formats_len(), 1);
    assert_eq!(formatter.cache().date_time_formats_len(), 1);
}
