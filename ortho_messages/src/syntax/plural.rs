//! Plural body helpers: the `offset:` token and `#` substitution.

use super::slice;

const OFFSET_TOKEN: &str = "offset:";

/// Extracts the first `offset:<digits>` token from a plural body.
///
/// Whitespace may separate the colon from the digits. Returns the offset
/// (zero when absent) and the body with that one token removed.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::syntax::extract_offset;
///
/// let (offset, rest) = extract_offset("offset:1 =0 {none} other {#}");
/// assert_eq!(offset, 1.0);
/// assert_eq!(rest, " =0 {none} other {#}");
/// ```
#[must_use]
pub fn extract_offset(body: &str) -> (f64, String) {
    for (start, _) in body.match_indices(OFFSET_TOKEN) {
        let after_token = start + OFFSET_TOKEN.len();
        let tail = slice(body, after_token, body.len());
        let digits_start = after_token + (tail.len() - tail.trim_start().len());
        let digits_len = slice(body, digits_start, body.len())
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits_len == 0 {
            continue;
        }
        let end = digits_start + digits_len;
        let offset = slice(body, digits_start, end).parse().unwrap_or(0.0);
        let mut cleaned = String::with_capacity(body.len());
        cleaned.push_str(slice(body, 0, start));
        cleaned.push_str(slice(body, end, body.len()));
        return (offset, cleaned);
    }
    (0.0, body.to_owned())
}

/// Replaces each `#` that is neither preceded nor followed by `{` with
/// `replacement`.
///
/// Matches are found left to right without overlap, and a match consumes
/// the character before the `#`. That character therefore cannot serve as
/// the `#` of another match, so in `##` only the first `#` is replaced.
///
/// # Examples
///
/// ```rust
/// use ortho_messages::syntax::substitute_hash;
///
/// assert_eq!(substitute_hash("# guests", "2"), "2 guests");
/// assert_eq!(substitute_hash("{#}", "2"), "{#}");
/// ```
#[must_use]
pub fn substitute_hash(text: &str, replacement: &str) -> String {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let char_at = |idx: usize| chars.get(idx).map(|&(_, ch)| ch);
    let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |&(offset, _)| offset);
    let boundary_ok = |idx: usize| char_at(idx) != Some('{');

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut idx = 0;
    while idx < chars.len() {
        if idx == 0 && char_at(0) == Some('#') && boundary_ok(1) {
            out.push_str(replacement);
            copied = byte_at(1);
            idx = 1;
            continue;
        }
        let prefix = char_at(idx);
        if prefix.is_some_and(|ch| ch != '{')
            && char_at(idx + 1) == Some('#')
            && boundary_ok(idx + 2)
        {
            out.push_str(slice(text, copied, byte_at(idx + 1)));
            out.push_str(replacement);
            copied = byte_at(idx + 2);
            idx += 2;
            continue;
        }
        idx += 1;
    }
    out.push_str(slice(text, copied, text.len()));
    out
}
