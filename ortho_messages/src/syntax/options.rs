//! Branch tables for `plural`, `selectordinal`, and `select` bodies.

use std::collections::HashMap;

use super::{find_closing_brace, slice};

/// Raw branch templates keyed by selector (`"one"`, `"=0"`, `"male"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchTable {
    branches: HashMap<String, String>,
}

impl BranchTable {
    /// Returns the unformatted branch stored under `selector`.
    #[must_use]
    pub fn get(&self, selector: &str) -> Option<&str> {
        self.branches.get(selector).map(String::as_str)
    }

    /// Returns the first branch present among `selectors`, in order.
    #[must_use]
    pub fn first_of<'s>(&self, selectors: impl IntoIterator<Item = &'s str>) -> Option<&str> {
        selectors.into_iter().find_map(|selector| self.get(selector))
    }

    /// Number of branches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether the table has no branches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BranchTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            branches: iter
                .into_iter()
                .map(|(selector, body)| (selector.into(), body.into()))
                .collect(),
        }
    }
}

/// Space, tab, line feed, carriage return, and no-break space.
const fn is_branch_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\u{a0}')
}

/// Parses `selector { body }` pairs into a [`BranchTable`].
///
/// Bodies may contain balanced braces. When a selector is not followed by
/// `{` the scan steps over a single character and resumes, a stray `}` is
/// stepped over the same way, and an unbalanced body ends parsing; branches
/// read so far are kept. Later duplicates replace earlier ones.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::syntax::parse_branches;
///
/// let table = parse_branches("=0 {none} one {# item} other {{n} items}");
/// assert_eq!(table.get("=0"), Some("none"));
/// assert_eq!(table.get("other"), Some("{n} items"));
/// ```
#[must_use]
pub fn parse_branches(text: &str) -> BranchTable {
    let mut branches = HashMap::new();
    let mut cursor = Cursor::new(text);

    loop {
        cursor.skip_while(is_branch_whitespace);
        if cursor.at_end() {
            break;
        }

        let start = cursor.pos;
        cursor.skip_while(|ch| !matches!(ch, '{' | '}') && !is_branch_whitespace(ch));
        let selector = slice(text, start, cursor.pos);
        cursor.skip_while(is_branch_whitespace);

        if cursor.peek() == Some('{') {
            let Some(close) = find_closing_brace(text, cursor.pos + 1) else {
                break;
            };
            branches.insert(
                selector.to_owned(),
                slice(text, cursor.pos + 1, close).to_owned(),
            );
            cursor.pos = close + 1;
        } else {
            cursor.bump();
        }
    }

    BranchTable { branches }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }
}
