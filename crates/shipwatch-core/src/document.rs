//! Opaque dashboard document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// A rendered dashboard definition.
///
/// The document is a JSON object whose shape is owned by the renderer
/// template and the Grafana backend; it is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardDocument(Map<String, Value>);

impl DashboardDocument {
    /// Creates a document from a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parses a document from raw bytes, requiring a top-level JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(Error::serialization().with_message(format!(
                "expected a JSON object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Returns the document title, if the renderer set one.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Returns the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the document and returns the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
