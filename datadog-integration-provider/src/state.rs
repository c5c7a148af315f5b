//! Per-instance resource data: identity plus attribute values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProviderError, Result};
use crate::schema::ResourceSchema;
use crate::utils::log_sanitizer::redact_attributes;

/// State of one resource instance as exchanged with the host.
///
/// An empty `id` means the resource does not exist (not yet created, or
/// found missing on refresh).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty data carrying only an id, as the host hands it to Import.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Builds data from a JSON object of attribute values.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(attributes) => Ok(Self {
                id: String::new(),
                attributes,
            }),
            other => Err(ProviderError::InvalidParameter {
                provider: "state".to_string(),
                param: "attributes".to_string(),
                detail: format!("expected a JSON object, got {other}"),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Marks the resource as gone.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Value of `name` only when it is set to something other than its zero value.
    pub fn get_ok(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
            Value::Bool(b) => *b,
            Value::Number(_) => true,
        })
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// String attribute, or `""` when absent.
    pub fn get_string(&self, name: &str) -> String {
        self.get_str(name).unwrap_or_default().to_string()
    }

    /// String-list attribute in its declared order; non-string items are skipped.
    pub fn get_string_list(&self, name: &str) -> Vec<String> {
        self.get_ok(name)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    /// Attribute map with the schema's sensitive values redacted, for logging.
    pub fn redacted(&self, schema: &ResourceSchema) -> Value {
        redact_attributes(&self.attributes, &schema.sensitive_attributes())
    }
}
