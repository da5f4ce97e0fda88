//! Forward-slash unescaping for serialized JSON.
//!
//! Some JSON encoders emit `\/` for every `/`. Clients expect hrefs such as
//! `"/widgets/42"` verbatim, so every rendered document goes through
//! [`unescape_slashes`].

use std::borrow::Cow;

/// Replaces every `\/` escape sequence in JSON text with `/`.
///
/// Escape pairs are consumed left to right, so an escaped backslash followed
/// by a slash (`\\/`) is left alone. The result never contains a `\/` escape
/// and applying the function twice changes nothing.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(unescape_slashes(r#"{"href":"\/widgets\/42"}"#), r#"{"href":"/widgets/42"}"#);
/// assert_eq!(unescape_slashes(r#""a\\/b""#), r#""a\\/b""#);
/// ```
pub fn unescape_slashes(json: &str) -> Cow<'_, str> {
    if !json.contains("\\/") {
        return Cow::Borrowed(json);
    }

    let mut out = String::with_capacity(json.len());
    let mut chars = json.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('/') => out.push('/'),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }

    Cow::Owned(out)
}
