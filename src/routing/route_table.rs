//! Named route templates.
//!
//! Template syntax:
//!
//! - `{name}` - required placeholder, percent-encoded on assembly
//! - `[...]` - optional part, emitted only when every placeholder in it has a value
//!
//! Parameters that no placeholder consumes are appended as query parameters,
//! followed by [`RouteOptions::query`].
//!
//! ```ignore
//! let mut routes = RouteTable::new();
//! routes.add("widgets", "/widgets[/{id}]")?;
//! routes.assemble("widgets", &params(json!({ "id": 42 })), &RouteOptions::default())?; // "/widgets/42"
//! routes.assemble("widgets", &params(json!({ "page": 2 })), &RouteOptions::default())?; // "/widgets?page=2"
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::RouteAssemblyError;
use crate::routing::{RouteOptions, RouteParams, UrlBuilder};

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

#[derive(Debug, Clone, PartialEq)]
enum Part {
    Literal(String),
    Param(String),
    Optional(Vec<Part>),
}

/// In-memory [`UrlBuilder`] over named templates.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, Vec<Part>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteAssemblyError::InvalidTemplate`] for unbalanced `[`/`]`
    /// or braces that are not a valid `{name}` placeholder.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        template: &str,
    ) -> Result<(), RouteAssemblyError> {
        let parts = parse_template(template)?;
        self.routes.insert(name.into(), parts);
        Ok(())
    }

    /// Builder-style [`RouteTable::add`].
    pub fn with_route(
        mut self,
        name: impl Into<String>,
        template: &str,
    ) -> Result<Self, RouteAssemblyError> {
        self.add(name, template)?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }
}

impl UrlBuilder for RouteTable {
    fn assemble(
        &self,
        name: &str,
        params: &RouteParams,
        options: &RouteOptions,
    ) -> Result<String, RouteAssemblyError> {
        let parts = self
            .routes
            .get(name)
            .ok_or_else(|| RouteAssemblyError::UnknownRoute(name.to_string()))?;

        let mut used = Vec::new();
        let path = render_parts(parts, params, &mut used, true)
            .map_err(|param| RouteAssemblyError::MissingParameter {
                route: name.to_string(),
                param,
            })?
            .unwrap_or_default();

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;

        for (key, value) in params {
            if used.contains(key) {
                continue;
            }
            if let Some(value) = param_to_string(value) {
                query.append_pair(key, &value);
                has_query = true;
            }
        }
        for (key, value) in &options.query {
            query.append_pair(key, value);
            has_query = true;
        }

        if has_query {
            Ok(format!("{}?{}", path, query.finish()))
        } else {
            Ok(path)
        }
    }
}

/// Renders `parts`; `Err(param)` names a missing required placeholder.
///
/// In non-strict (optional) mode a missing placeholder yields `Ok(None)`.
fn render_parts(
    parts: &[Part],
    params: &RouteParams,
    used: &mut Vec<String>,
    strict: bool,
) -> Result<Option<String>, String> {
    let mut out = String::new();
    let mut local_used = Vec::new();

    for part in parts {
        match part {
            Part::Literal(text) => out.push_str(text),
            Part::Param(name) => match params.get(name).and_then(param_to_string) {
                Some(value) => {
                    out.push_str(&urlencoding::encode(&value));
                    local_used.push(name.clone());
                }
                None if strict => return Err(name.clone()),
                None => return Ok(None),
            },
            Part::Optional(inner) => {
                if let Some(text) = render_parts(inner, params, &mut local_used, false)? {
                    out.push_str(&text);
                }
            }
        }
    }

    used.extend(local_used);
    Ok(Some(out))
}

fn param_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn parse_template(template: &str) -> Result<Vec<Part>, RouteAssemblyError> {
    let invalid = |reason: &str| RouteAssemblyError::InvalidTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut stack: Vec<Vec<Part>> = vec![Vec::new()];
    let mut chunk = String::new();

    for c in template.chars() {
        match c {
            '[' => {
                let parts = split_chunk(&chunk).ok_or_else(|| invalid("malformed placeholder"))?;
                chunk.clear();
                if let Some(current) = stack.last_mut() {
                    current.extend(parts);
                }
                stack.push(Vec::new());
            }
            ']' => {
                let parts = split_chunk(&chunk).ok_or_else(|| invalid("malformed placeholder"))?;
                chunk.clear();
                if stack.len() < 2 {
                    return Err(invalid("unexpected ']'"));
                }
                let mut optional = stack.pop().unwrap_or_default();
                optional.extend(parts);
                if let Some(parent) = stack.last_mut() {
                    parent.push(Part::Optional(optional));
                }
            }
            _ => chunk.push(c),
        }
    }

    if stack.len() != 1 {
        return Err(invalid("unclosed '['"));
    }

    let parts = split_chunk(&chunk).ok_or_else(|| invalid("malformed placeholder"))?;
    let mut root = stack.pop().unwrap_or_default();
    root.extend(parts);
    Ok(root)
}

/// Splits a bracket-free chunk into literals and placeholders.
///
/// Returns `None` when a stray `{` or `}` remains outside a valid placeholder.
fn split_chunk(chunk: &str) -> Option<Vec<Part>> {
    let mut parts = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER_REGEX.captures_iter(chunk) {
        let whole = caps.get(0)?;
        push_literal(&mut parts, &chunk[last..whole.start()])?;
        parts.push(Part::Param(caps[1].to_string()));
        last = whole.end();
    }
    push_literal(&mut parts, &chunk[last..])?;

    Some(parts)
}

fn push_literal(parts: &mut Vec<Part>, text: &str) -> Option<()> {
    if text.contains(['{', '}']) {
        return None;
    }
    if !text.is_empty() {
        parts.push(Part::Literal(text.to_string()));
    }
    Some(())
}
