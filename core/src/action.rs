//! POST action descriptors consumed by the repository's generic write
//! endpoint.
//!
//! # Design
//! A descriptor names the target path and the form fields to send. When
//! `append` is set, the submitting form contributes one more field under
//! that name (the edited title, the checkbox state). Descriptors have no
//! identity beyond their content and are rebuilt on every render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

pub const CHARSET: &str = "_charset_";
pub const OPERATION: &str = ":operation";
pub const APPLY_TO: &str = ":applyTo";
pub const DELETE: &str = "delete";
pub const TITLE: &str = "jcr:title";
pub const RESOURCE_TYPE: &str = "sling:resourceType";
pub const TYPE_HINT_SUFFIX: &str = "@TypeHint";
pub const BOOLEAN_HINT: &str = "Boolean";
pub const UTF_8: &str = "utf-8";

/// A form field value. `Paths` is sent as one field per path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Paths(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub path: String,
    pub data: BTreeMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<String>,
}

impl ActionDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            data: BTreeMap::new(),
            append: None,
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn append(mut self, name: impl Into<String>) -> Self {
        self.append = Some(name.into());
        self
    }

    /// Serialized form embedded into the rendered markup.
    pub fn to_json(&self) -> Result<String, ViewError> {
        serde_json::to_string(self).map_err(|e| ViewError::SerializationError(e.to_string()))
    }
}

/// `<field>@TypeHint`, the sibling key telling the write endpoint how to
/// coerce `<field>`.
pub fn type_hint(field: &str) -> String {
    format!("{field}{TYPE_HINT_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_is_omitted_when_absent() {
        let action = ActionDescriptor::new("/content/todo/a").field(OPERATION, DELETE);
        let json: serde_json::Value = serde_json::from_str(&action.to_json().unwrap()).unwrap();
        assert_eq!(json["path"], "/content/todo/a");
        assert_eq!(json["data"][":operation"], "delete");
        assert!(json.get("append").is_none());
    }

    #[test]
    fn field_values_serialize_as_plain_json() {
        let action = ActionDescriptor::new("/content/todo")
            .field("/content/todo/a/completed", true)
            .field(APPLY_TO, FieldValue::Paths(vec!["/content/todo/b".to_string()]))
            .append(TITLE);
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["data"]["/content/todo/a/completed"], true);
        assert_eq!(json["data"][":applyTo"], serde_json::json!(["/content/todo/b"]));
        assert_eq!(json["append"], "jcr:title");
    }

    #[test]
    fn type_hint_key() {
        assert_eq!(type_hint("completed"), "completed@TypeHint");
    }
}
