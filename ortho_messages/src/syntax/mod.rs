//! Template scanning and the message AST.
//!
//! [`parse`] walks a template once, left to right, and produces a flat list of
//! [`Node`]s. The grammar is deliberately lenient: an unmatched `{`, a `<` that
//! does not open a well-formed tag, or a tag without its closing partner are
//! kept as literal text instead of being reported as errors.
//!
//! Plural and select branches are kept as raw text. Branch bodies are only
//! parsed once selected, because plural branches have `#` substituted before
//! they are interpreted.

mod options;
mod plural;

pub use options::{BranchTable, parse_branches};
pub use plural::{extract_offset, substitute_hash};

use tracing::warn;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::locale::PluralKind;
use crate::output::Mode;

/// One node of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text. Consecutive text nodes mark the places where the scanner
    /// flushed its buffer, which keeps rich-mode chunk boundaries stable.
    Text(String),
    /// A `{...}` placeholder.
    Argument(Argument),
    /// A `<name/>` tag (rich mode only).
    SelfClosingTag(SelfClosingTag),
    /// A `<name>...</name>` tag (rich mode only).
    PairedTag(PairedTag),
}

/// A `{key}` or `{key, type, rest}` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Name of the value to substitute.
    pub key: String,
    /// Formatting requested for the value.
    pub kind: ArgumentKind,
    /// Byte offset of the opening brace in the template.
    pub position: usize,
}

/// Formatting requested by a placeholder's type segment.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentKind {
    /// Plain substitution; also used for unrecognised types.
    Simple,
    /// Locale-aware number formatting.
    Number,
    /// Locale-aware medium date formatting.
    Date,
    /// Locale-aware medium time formatting.
    Time,
    /// `plural` or `selectordinal` branch selection.
    Plural(PluralArgument),
    /// `select` branch selection.
    Select(BranchTable),
}

/// Body of a `plural` or `selectordinal` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralArgument {
    /// Cardinal for `plural`, ordinal for `selectordinal`.
    pub kind: PluralKind,
    /// Value subtracted from the operand before selection.
    pub offset: f64,
    /// Raw branch templates keyed by selector.
    pub branches: BranchTable,
}

/// A `<name/>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfClosingTag {
    /// Tag name used to look up a renderer.
    pub name: String,
    /// The tag exactly as written, emitted when it cannot be rendered.
    pub source: String,
    /// Byte offset of the `<` in the template.
    pub position: usize,
}

/// A `<name>children</name>` tag.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedTag {
    /// Tag name used to look up a renderer.
    pub name: String,
    /// Parsed inner content.
    pub children: Vec<Node>,
    /// Byte offset of the opening `<` in the template.
    pub position: usize,
}

/// Parses `template` into nodes.
///
/// Markup is only recognised in [`Mode::Rich`]; in plain mode `<` is ordinary
/// text. Tags nested deeper than [`DEFAULT_MAX_DEPTH`] are kept as text; see
/// [`parse_with_depth`].
///
/// # Examples
///
/// ```rust
/// use ortho_messages::Mode;
/// use ortho_messages::syntax::{Node, parse};
///
/// let nodes = parse("a {b", Mode::Plain);
/// assert_eq!(
///     nodes,
///     vec![Node::Text("a ".to_owned()), Node::Text("{b".to_owned())]
/// );
/// ```
#[must_use]
pub fn parse(template: &str, mode: Mode) -> Vec<Node> {
    parse_with_depth(template, mode, DEFAULT_MAX_DEPTH)
}

/// Parses `template`, interpreting at most `max_depth` levels of nested
/// paired tags.
///
/// A paired tag that would open level `max_depth + 1` is emitted, children
/// and all, as a single text node.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::Mode;
/// use ortho_messages::syntax::{Node, parse_with_depth};
///
/// let nodes = parse_with_depth("<a><b>x</b></a>", Mode::Rich, 1);
/// let Some(Node::PairedTag(outer)) = nodes.first() else {
///     panic!("expected a paired tag");
/// };
/// assert_eq!(outer.children, vec![Node::Text("<b>x</b>".to_owned())]);
/// ```
#[must_use]
pub fn parse_with_depth(template: &str, mode: Mode, max_depth: usize) -> Vec<Node> {
    Scanner::new(template, mode, max_depth).run()
}

/// Returns the byte offset of the `}` balancing an already opened `{`.
///
/// Scanning starts at `start`, just past the opening brace.
pub(crate) fn find_closing_brace(text: &str, start: usize) -> Option<usize> {
    let mut balance = 1_usize;
    for (offset, byte) in text.bytes().enumerate().skip(start) {
        match byte {
            b'{' => balance += 1,
            b'}' => {
                balance -= 1;
                if balance == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns `text[start..end]`, or an empty string for an invalid range.
pub(crate) fn slice(text: &str, start: usize, end: usize) -> &str {
    text.get(start..end).unwrap_or_default()
}

struct Scanner<'a> {
    template: &'a str,
    mode: Mode,
    /// Paired-tag levels still allowed below this scanner.
    budget: usize,
    nodes: Vec<Node>,
    buffer: String,
}

impl<'a> Scanner<'a> {
    const fn new(template: &'a str, mode: Mode, budget: usize) -> Self {
        Self {
            template,
            mode,
            budget,
            nodes: Vec::new(),
            buffer: String::new(),
        }
    }

    fn run(mut self) -> Vec<Node> {
        let mut pos = 0;
        while let Some(ch) = self.char_at(pos) {
            pos = match ch {
                '{' => self.placeholder(pos),
                '<' if self.mode == Mode::Rich => self.tag(pos),
                _ => self.literal(pos, ch),
            };
        }
        self.flush();
        self.nodes
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.template.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn literal(&mut self, pos: usize, ch: char) -> usize {
        self.buffer.push(ch);
        pos + ch.len_utf8()
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.nodes.push(Node::Text(std::mem::take(&mut self.buffer)));
        }
    }

    fn placeholder(&mut self, pos: usize) -> usize {
        self.flush();
        let Some(close) = find_closing_brace(self.template, pos + 1) else {
            return self.literal(pos, '{');
        };
        let content = slice(self.template, pos + 1, close);
        self.nodes.push(Node::Argument(Argument::parse(content, pos)));
        close + 1
    }

    fn tag(&mut self, pos: usize) -> usize {
        let Some(gt) = self
            .template
            .get(pos..)
            .and_then(|rest| rest.find('>'))
            .map(|offset| pos + offset)
        else {
            return self.literal(pos, '<');
        };
        let full = slice(self.template, pos + 1, gt);
        let head = full.split(' ').next().unwrap_or_default();
        if full.starts_with(' ') || !is_tag_token(head) {
            return self.literal(pos, '<');
        }

        self.flush();
        let name = full.replacen('/', "", 1).trim().to_owned();
        if full.ends_with('/') {
            self.nodes.push(Node::SelfClosingTag(SelfClosingTag {
                name,
                source: format!("<{full}>"),
                position: pos,
            }));
            return gt + 1;
        }

        let closing = format!("</{name}>");
        let Some(close) = self
            .template
            .get(gt..)
            .and_then(|rest| rest.find(&closing))
            .map(|offset| gt + offset)
        else {
            return self.literal(pos, '<');
        };
        let end = close + closing.len();
        let Some(budget) = self.budget.checked_sub(1) else {
            warn!(tag = %name, "markup nesting too deep; emitting tag literally");
            self.nodes.push(Node::Text(slice(self.template, pos, end).to_owned()));
            return end;
        };
        let inner = slice(self.template, gt + 1, close);
        self.nodes.push(Node::PairedTag(PairedTag {
            name,
            children: Self::new(inner, self.mode, budget).run(),
            position: pos,
        }));
        end
    }
}

/// Matches `^[a-zA-Z0-9_-]+/?$`.
fn is_tag_token(token: &str) -> bool {
    let name = token.strip_suffix('/').unwrap_or(token);
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'))
}

impl Argument {
    /// Splits placeholder `content` into key, type, and sub-format body.
    ///
    /// Without a comma the whole content is the key, untrimmed. Unknown
    /// types degrade to [`ArgumentKind::Simple`].
    #[must_use]
    pub fn parse(content: &str, position: usize) -> Self {
        let Some((raw_key, remainder)) = content.split_once(',') else {
            return Self {
                key: content.to_owned(),
                kind: ArgumentKind::Simple,
                position,
            };
        };
        let spec = remainder.trim();
        let (kind_name, rest) = spec
            .split_once(',')
            .map_or((spec, ""), |(name, body)| (name.trim(), body.trim()));

        let kind = match kind_name {
            "number" => ArgumentKind::Number,
            "date" => ArgumentKind::Date,
            "time" => ArgumentKind::Time,
            "plural" | "selectordinal" => {
                let (offset, cleaned) = extract_offset(rest);
                ArgumentKind::Plural(PluralArgument {
                    kind: if kind_name == "plural" {
                        PluralKind::Cardinal
                    } else {
                        PluralKind::Ordinal
                    },
                    offset,
                    branches: parse_branches(&cleaned),
                })
            }
            "select" => ArgumentKind::Select(parse_branches(rest)),
            _ => ArgumentKind::Simple,
        };

        Self {
            key: raw_key.trim().to_owned(),
            kind,
            position,
        }
    }
}
