//! Generic JSON serialization of rendered documents.

use serde_json::Value;

use crate::error::HalError;

/// Turns a finished JSON value into text.
pub trait DocumentSerializer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`HalError::Serialization`] if the value cannot be encoded.
    fn serialize(&self, value: &Value) -> Result<String, HalError>;
}

/// `serde_json`-backed serializer.
///
/// `escape_slashes` makes the output use `\/` for every `/`, matching
/// encoders that escape slashes by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    pub pretty: bool,
    pub escape_slashes: bool,
}

impl JsonSerializer {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

impl DocumentSerializer for JsonSerializer {
    fn serialize(&self, value: &Value) -> Result<String, HalError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        // `/` only ever occurs inside JSON strings
        if self.escape_slashes {
            Ok(text.replace('/', "\\/"))
        } else {
            Ok(text)
        }
    }
}
