//! Message trees and dot-path lookup.
//!
//! A [`MessageTree`] is the immutable, per-locale catalogue of templates. It is
//! built (or deserialised) by the host application before any formatting
//! happens and shared cheaply between translators: cloning a tree only bumps a
//! reference count.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::number_to_string;

/// A node stored in a [`MessageTree`].
///
/// Only [`MessageValue::Text`] leaves are treated as templates. Every other
/// leaf is stringified verbatim when requested as a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageValue {
    /// A message template.
    Text(String),
    /// A boolean leaf.
    Bool(bool),
    /// A numeric leaf.
    Number(f64),
    /// An explicit null leaf.
    Null,
    /// A list of values.
    List(Vec<Self>),
    /// A nested subtree.
    Tree(MessageTree),
}

impl MessageValue {
    /// Returns the template text when this value is a text leaf.
    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the subtree when this value is a nested tree.
    #[must_use]
    pub const fn as_tree(&self) -> Option<&MessageTree> {
        match self {
            Self::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

impl fmt::Display for MessageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Number(number) => f.write_str(&number_to_string(*number)),
            Self::Null => f.write_str("null"),
            Self::List(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Tree(_) => f.write_str("[tree]"),
        }
    }
}

impl From<&str> for MessageValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MessageValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for MessageValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for MessageValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<MessageTree> for MessageValue {
    fn from(value: MessageTree) -> Self {
        Self::Tree(value)
    }
}

/// An arbitrarily nested, string-keyed catalogue of message templates.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::{MessageTree, get_nested_message};
///
/// let nav: MessageTree = [("books", "Books")].into_iter().collect();
/// let tree: MessageTree = [("nav", nav)].into_iter().collect();
///
/// let found = get_nested_message(&tree, "nav.books");
/// assert_eq!(found.and_then(|value| value.as_text()), Some("Books"));
/// assert!(get_nested_message(&tree, "nav.missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageTree {
    entries: Arc<BTreeMap<String, MessageValue>>,
}

impl MessageTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under `key`, returning the value it replaced.
    ///
    /// Trees shared with other owners are copied on write.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MessageValue>,
    ) -> Option<MessageValue> {
        Arc::make_mut(&mut self.entries).insert(key.into(), value.into())
    }

    /// Returns the direct child stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MessageValue> {
        self.entries.get(key)
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the direct children in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Parses a tree from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Json`](crate::TreeError::Json) when the input is
    /// not valid JSON or its root is not an object.
    #[cfg(feature = "serde_json")]
    pub fn from_json_str(input: &str) -> Result<Self, crate::TreeError> {
        Ok(serde_json::from_str(input)?)
    }
}

impl<K, V> FromIterator<(K, V)> for MessageTree
where
    K: Into<String>,
    V: Into<MessageValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl Serialize for MessageTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MessageTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, MessageValue>::deserialize(deserializer)?;
        Ok(Self {
            entries: Arc::new(entries),
        })
    }
}

/// Resolves a dot-separated `path` against `tree`.
///
/// Each segment descends one level; the walk stops with `None` as soon as a
/// segment is absent or the current value is not a subtree. An empty path
/// never matches. The lookup is pure and never panics.
#[must_use]
pub fn get_nested_message<'tree>(
    tree: &'tree MessageTree,
    path: &str,
) -> Option<&'tree MessageValue> {
    if path.is_empty() {
        return None;
    }
    let mut segments = path.split('.');
    let first = segments.next()?;
    segments.try_fold(tree.get(first)?, |current, segment| {
        current.as_tree()?.get(segment)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tree() -> MessageTree {
        let books: MessageTree = [("title", "Books"), ("empty", "")].into_iter().collect();
        let mut nav = MessageTree::new();
        nav.insert("books", books);
        nav.insert("count", 3.0);
        let mut root = MessageTree::new();
        root.insert("nav", nav);
        root.insert("greeting", "Hello");
        root
    }

    #[rstest]
    #[case::top_level("greeting", Some("Hello"))]
    #[case::nested("nav.books.title", Some("Books"))]
    #[case::present_empty("nav.books.empty", Some(""))]
    #[case::missing_leaf("nav.books.author", None)]
    #[case::through_leaf("greeting.length", None)]
    #[case::empty_segment("nav..books", None)]
    #[case::empty_path("", None)]
    fn resolves_text_paths(tree: MessageTree, #[case] path: &str, #[case] expected: Option<&str>) {
        let found = get_nested_message(&tree, path).and_then(MessageValue::as_text);
        assert_eq!(found, expected);
    }

    #[rstest]
    fn returns_subtrees_untouched(tree: MessageTree) {
        let found = get_nested_message(&tree, "nav.books").expect("subtree should resolve");
        let subtree = found.as_tree().expect("value should be a tree");
        assert_eq!(subtree.len(), 2);
    }

    #[rstest]
    fn distinguishes_missing_from_empty(tree: MessageTree) {
        assert!(get_nested_message(&tree, "nav.books.empty").is_some());
        assert!(get_nested_message(&tree, "nav.books.nothing").is_none());
    }

    #[rstest]
    #[case::number(MessageValue::Number(3.0), "3")]
    #[case::fraction(MessageValue::Number(1.5), "1.5")]
    #[case::boolean(MessageValue::Bool(true), "true")]
    #[case::null(MessageValue::Null, "null")]
    #[case::list(MessageValue::List(vec!["a".into(), 2.0.into()]), "a,2")]
    #[case::tree(MessageValue::Tree(MessageTree::new()), "[tree]")]
    fn stringifies_non_text_leaves(#[case] value: MessageValue, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    fn insert_copies_shared_trees_on_write(tree: MessageTree) {
        let mut copy = tree.clone();
        copy.insert("greeting", "Hi");
        assert_eq!(tree.get("greeting").and_then(MessageValue::as_text), Some("Hello"));
        assert_eq!(copy.get("greeting").and_then(MessageValue::as_text), Some("Hi"));
    }

    #[cfg(feature = "serde_json")]
    #[rstest]
    fn parses_json_documents() {
        let tree = MessageTree::from_json_str(
            r#"{"ns": {"greet": "Hello {name}", "count": 2, "flag": false, "none": null}}"#,
        )
        .expect("json should parse");
        let ns = get_nested_message(&tree, "ns").and_then(MessageValue::as_tree);
        let ns = ns.expect("namespace should be a tree");
        assert_eq!(ns.get("greet").and_then(MessageValue::as_text), Some("Hello {name}"));
        assert_eq!(ns.get("count"), Some(&MessageValue::Number(2.0)));
        assert_eq!(ns.get("flag"), Some(&MessageValue::Bool(false)));
        assert_eq!(ns.get("none"), Some(&MessageValue::Null));
    }

    #[cfg(feature = "serde_json")]
    #[rstest]
    fn rejects_non_object_json() {
        assert!(MessageTree::from_json_str("[1, 2]").is_err());
    }
}
