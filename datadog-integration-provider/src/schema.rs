//! Resource schema definitions
//!
//! Describes each resource's attributes the way the host expects them:
//! type, required/optional, force-new and sensitive flags, and an
//! optional default. Handlers never read raw configuration without the
//! schema having validated it first.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::state::ResourceData;

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A single string.
    String,
    /// An ordered list of strings.
    StringList,
}

impl AttributeType {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::StringList => "list of strings",
        }
    }
}

/// One attribute of a resource schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub required: bool,
    pub optional: bool,
    /// Changing this attribute replaces the resource instead of updating it.
    pub force_new: bool,
    /// Value is redacted from logs and plan output.
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Attribute {
    fn new(kind: AttributeType, required: bool) -> Self {
        Self {
            kind,
            required,
            optional: !required,
            force_new: false,
            sensitive: false,
            default: None,
        }
    }

    pub fn required_string() -> Self {
        Self::new(AttributeType::String, true)
    }

    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, false)
    }

    pub fn required_string_list() -> Self {
        Self::new(AttributeType::StringList, true)
    }

    #[must_use]
    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Schema of one resource type.
///
/// Attribute order is preserved for stable output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    pub type_name: String,
    pub attributes: Vec<(String, Attribute)>,
}

impl ResourceSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.push((name.into(), attribute));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    /// Names of attributes flagged sensitive.
    pub fn sensitive_attributes(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.sensitive)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    fn invalid(&self, param: &str, detail: impl Into<String>) -> ProviderError {
        ProviderError::InvalidParameter {
            provider: self.type_name.clone(),
            param: param.to_string(),
            detail: detail.into(),
        }
    }

    /// Checks `data` against the schema and fills defaults for absent optional attributes.
    ///
    /// Rejects unknown attributes, missing required ones, and type mismatches.
    pub fn validate(&self, data: &mut ResourceData) -> Result<()> {
        if let Some(unknown) = data
            .attributes()
            .keys()
            .find(|k| self.attribute(k).is_none())
        {
            return Err(self.invalid(unknown, "unsupported attribute"));
        }

        for (name, attribute) in &self.attributes {
            match data.get(name) {
                None | Some(Value::Null) => {
                    if attribute.required {
                        return Err(self.invalid(name, "required attribute is missing"));
                    }
                    if let Some(default) = &attribute.default {
                        data.set(name, default.clone());
                    }
                }
                Some(value) if !attribute.kind.matches(value) => {
                    return Err(self.invalid(
                        name,
                        format!("expected {}", attribute.kind.name()),
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Force-new attributes whose value differs between `prior` and `planned`.
    ///
    /// Non-empty means the host must delete and re-create rather than update.
    pub fn force_new_changes(&self, prior: &ResourceData, planned: &ResourceData) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|(name, attribute)| {
                attribute.force_new && prior.get(name) != planned.get(name)
            })
            .map(|(name, _)| name.clone())
            .collect()
    }
}
