//! URI syntax checks for link targets.
//!
//! Link hrefs may be absolute (`https://api.example.com/widgets`) or relative
//! (`/widgets/42`, `../parent`), and templated hrefs carry RFC 6570
//! expressions (`/widgets{?page}`), so braces are accepted.

use std::sync::LazyLock;

use regex::Regex;
use url::{ParseError, Url};

/// Base used only to check that a relative reference resolves.
const RELATIVE_BASE: &str = "http://localhost/";

/// RFC 3986 reserved characters, besides the unreserved alphanumerics and `-._~`.
const RESERVED: &str = ":/?#[]@!$&'()*+,;=";

static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Errors that can occur while validating a link target.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    #[error("URI must not be empty")]
    Empty,

    #[error("URI contains forbidden character {0:?}")]
    ForbiddenCharacter(char),

    #[error("Malformed percent-encoding at byte {0}")]
    InvalidPercentEncoding(usize),

    #[error("Invalid URI format: {0}")]
    InvalidFormat(String),
}

/// Checks that `input` is a syntactically valid absolute or relative URI.
///
/// # Rules
///
/// 1. **Empty** strings are rejected
/// 2. **Whitespace and control characters** are rejected
/// 3. **Characters never allowed in a URI** (`<`, `>`, `"`, `\`, `^`, `` ` ``, `|`) are rejected
/// 4. **Percent signs** must be followed by two hex digits
/// 5. **Only unreserved, reserved and `%` characters** are allowed, plus `{`/`}` for templates
/// 6. **Brackets** may only appear in the authority (IPv6 literals)
/// 7. **Relative references** may not carry `:` in their first path segment
/// 8. **Absolute URIs** must parse with a valid authority and port
/// 9. **Relative references** must resolve against a base URL
///
/// # Errors
///
/// Returns the first [`UriError`] encountered.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_uri("https://example.com/widgets").is_ok());
/// assert!(validate_uri("/widgets/42").is_ok());
/// assert!(validate_uri("/widgets{?page}").is_ok());
/// assert!(validate_uri("not a url").is_err());
/// ```
pub fn validate_uri(input: &str) -> Result<(), UriError> {
    if input.is_empty() {
        return Err(UriError::Empty);
    }

    if let Some(c) = input
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || "<>\"\\^`|".contains(*c))
    {
        return Err(UriError::ForbiddenCharacter(c));
    }

    check_percent_encoding(input)?;

    if let Some(c) = input.chars().find(|c| !is_uri_char(*c)) {
        return Err(UriError::ForbiddenCharacter(c));
    }

    check_components(input)?;

    match Url::parse(input) {
        Ok(_) => Ok(()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_BASE)
                .map_err(|e| UriError::InvalidFormat(e.to_string()))?;
            base.join(input)
                .map(|_| ())
                .map_err(|e| UriError::InvalidFormat(e.to_string()))
        }
        Err(e) => Err(UriError::InvalidFormat(e.to_string())),
    }
}

fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~%{}".contains(c) || RESERVED.contains(c)
}

fn check_percent_encoding(input: &str) -> Result<(), UriError> {
    let bytes = input.as_bytes();
    for (i, _) in input.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(UriError::InvalidPercentEncoding(i));
        }
    }
    Ok(())
}

/// Splits off scheme and authority to check the component-level rules.
fn check_components(input: &str) -> Result<(), UriError> {
    let scheme_len = SCHEME_REGEX.find(input).map_or(0, |m| m.end());
    let rest = &input[scheme_len..];

    let (authority, path_and_more) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            after.split_at(end)
        }
        None => ("", rest),
    };

    if let Some(c) = path_and_more.chars().find(|c| *c == '[' || *c == ']') {
        return Err(UriError::ForbiddenCharacter(c));
    }

    if scheme_len == 0 && authority.is_empty() {
        let first_segment = path_and_more
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        if first_segment.contains(':') {
            return Err(UriError::InvalidFormat(format!(
                "relative reference has ':' in its first segment: {first_segment}"
            )));
        }
    }

    Ok(())
}
