//! A single HAL resource: payload, identifier, links and embedded resources.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::link::Link;
use crate::domain::link_collection::LinkCollection;
use crate::error::HalError;

/// Identifier of a resource, as found in its id field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Str(String),
}

impl Identifier {
    /// Reads an identifier from a JSON value; only integers and strings qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Int),
            Value::String(s) => Some(Self::Str(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::from(*i),
            Self::Str(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Content of one `_embedded` relation.
#[derive(Debug, Clone, PartialEq)]
pub enum Embedded {
    One(Box<HalResource>),
    Many(Vec<HalResource>),
}

/// A domain entity wrapped for HAL rendering.
///
/// Rendering never mutates a resource; links and embeds are attached
/// beforehand by application code.
#[derive(Debug, Clone, PartialEq)]
pub struct HalResource {
    payload: Map<String, Value>,
    identifier: Identifier,
    links: LinkCollection,
    embedded: Vec<(String, Embedded)>,
}

impl HalResource {
    pub fn new(payload: Map<String, Value>, identifier: impl Into<Identifier>) -> Self {
        Self {
            payload,
            identifier: identifier.into(),
            links: LinkCollection::new(),
            embedded: Vec::new(),
        }
    }

    /// Wraps any serializable entity.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`] if `entity` does not serialize to a JSON object.
    pub fn from_entity<T: Serialize>(
        entity: &T,
        identifier: impl Into<Identifier>,
    ) -> Result<Self, HalError> {
        match serde_json::to_value(entity)? {
            Value::Object(payload) => Ok(Self::new(payload, identifier)),
            other => Err(HalError::invalid_argument(format!(
                "Resource payload must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Wraps a JSON object, taking the identifier from `identifier_name`.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`] if the value is not an object or
    /// has no integer/string field named `identifier_name`.
    pub fn from_object(value: Value, identifier_name: &str) -> Result<Self, HalError> {
        let Value::Object(payload) = value else {
            return Err(HalError::invalid_argument(format!(
                "Resource payload must be a JSON object, got {}",
                json_kind(&value)
            )));
        };

        let identifier = payload
            .get(identifier_name)
            .and_then(Identifier::from_value)
            .ok_or_else(|| {
                HalError::invalid_argument(format!(
                    "Resource payload has no usable \"{identifier_name}\" field"
                ))
            })?;

        Ok(Self::new(payload, identifier))
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn links(&self) -> &LinkCollection {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut LinkCollection {
        &mut self.links
    }

    pub fn add_link(&mut self, link: Link) {
        self.links.add(link);
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.add(link);
        self
    }

    /// Embeds a single resource under `relation`, replacing any previous embed.
    pub fn embed(&mut self, relation: impl Into<String>, resource: HalResource) {
        self.set_embedded(relation.into(), Embedded::One(Box::new(resource)));
    }

    /// Embeds a list of resources under `relation`, replacing any previous embed.
    pub fn embed_many(&mut self, relation: impl Into<String>, resources: Vec<HalResource>) {
        self.set_embedded(relation.into(), Embedded::Many(resources));
    }

    pub fn with_embedded(mut self, relation: impl Into<String>, resource: HalResource) -> Self {
        self.embed(relation, resource);
        self
    }

    pub fn embedded(&self) -> impl Iterator<Item = (&str, &Embedded)> {
        self.embedded.iter().map(|(rel, e)| (rel.as_str(), e))
    }

    pub fn get_embedded(&self, relation: &str) -> Option<&Embedded> {
        self.embedded
            .iter()
            .find(|(rel, _)| rel == relation)
            .map(|(_, e)| e)
    }

    fn set_embedded(&mut self, relation: String, embedded: Embedded) {
        match self.embedded.iter_mut().find(|(rel, _)| *rel == relation) {
            Some(slot) => slot.1 = embedded,
            None => self.embedded.push((relation, embedded)),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
