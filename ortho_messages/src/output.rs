//! Format results and the collapse from chunk sequences to return shapes.

use std::fmt;

/// Selects how a template is interpreted and what shape the result takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Markup is literal text and the result is always a string.
    #[default]
    Plain,
    /// `<tag>` markup is interpreted and content values pass through.
    Rich,
}

/// One piece of formatted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk<C> {
    /// Literal or substituted text.
    Text(String),
    /// Opaque content with a stable identity key.
    ///
    /// The key is derived from the template offset that produced the content
    /// (`"12"`), suffixed with the element index for spliced sequences
    /// (`"12-0"`), so hosts rendering lists get stable identities.
    Content {
        /// Identity key, unique among the siblings of one format call.
        key: String,
        /// Caller-supplied content.
        content: C,
    },
}

impl<C> Chunk<C> {
    /// Returns the text of a text chunk.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Content { .. } => None,
        }
    }

    /// Returns the content of a content chunk.
    #[must_use]
    pub const fn as_content(&self) -> Option<&C> {
        match self {
            Self::Text(_) => None,
            Self::Content { content, .. } => Some(content),
        }
    }
}

impl<C: fmt::Display> fmt::Display for Chunk<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Content { content, .. } => fmt::Display::fmt(content, f),
        }
    }
}

/// The collapsed result of a format call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatted<C> {
    /// A single string: empty output, a lone text chunk, or joined plain output.
    Text(String),
    /// A mixed sequence of text and content (rich mode only).
    Chunks(Vec<Chunk<C>>),
}

impl<C> Formatted<C> {
    /// Returns the string when the result collapsed to text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Chunks(_) => None,
        }
    }

    /// Converts the result into a chunk sequence.
    ///
    /// Empty text becomes an empty sequence.
    #[must_use]
    pub fn into_chunks(self) -> Vec<Chunk<C>> {
        match self {
            Self::Text(text) if text.is_empty() => Vec::new(),
            Self::Text(text) => vec![Chunk::Text(text)],
            Self::Chunks(chunks) => chunks,
        }
    }
}

impl<C: fmt::Display> Formatted<C> {
    /// Flattens the result to a string, stringifying content chunks.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Chunks(chunks) => join(&chunks),
        }
    }
}

impl<C: fmt::Display> fmt::Display for Formatted<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Chunks(chunks) => chunks
                .iter()
                .try_for_each(|chunk| fmt::Display::fmt(chunk, f)),
        }
    }
}

impl<C> From<String> for Formatted<C> {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Joins chunks into one string, stringifying content.
#[must_use]
pub fn join<C: fmt::Display>(chunks: &[Chunk<C>]) -> String {
    chunks.iter().map(ToString::to_string).collect()
}

/// Reduces an ordered chunk sequence to its canonical return shape.
///
/// * no chunks ⇒ empty text;
/// * exactly one text chunk ⇒ that text;
/// * plain mode ⇒ every chunk joined into one string;
/// * rich mode ⇒ the sequence unchanged.
#[must_use]
pub fn collapse<C: fmt::Display>(mut chunks: Vec<Chunk<C>>, mode: Mode) -> Formatted<C> {
    if chunks.is_empty() {
        return Formatted::Text(String::new());
    }
    if chunks.len() == 1 && matches!(chunks.first(), Some(Chunk::Text(_))) {
        if let Some(Chunk::Text(text)) = chunks.pop() {
            return Formatted::Text(text);
        }
    }
    match mode {
        Mode::Plain => Formatted::Text(join(&chunks)),
        Mode::Rich => Formatted::Chunks(chunks),
    }
}
