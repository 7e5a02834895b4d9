//! Text helpers for behavioural step arguments.
//!
//! Gherkin steps quote their arguments and cannot carry raw newlines, so
//! step definitions pass captured text through these helpers before using it
//! as a template, key, or expected output.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Unquotes a step argument and expands `\n` and `\t` escapes.
#[must_use]
pub fn step_text(value: &str) -> String {
    unquote(value).replace("\\n", "\n").replace("\\t", "\t")
}

/// Splits `name=value; other=value` into trimmed pairs.
///
/// Segments without `=` are skipped. Values keep inner whitespace and may
/// contain commas, which plural and select templates need.
#[must_use]
pub fn assignments(spec: &str) -> Vec<(String, String)> {
    spec.split(';')
        .filter_map(|segment| segment.split_once('='))
        .map(|(name, value)| (name.trim().to_owned(), step_text(value)))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}
