//! Content-repository resources as seen by the view models.
//!
//! # Design
//! Resources are read-only inputs. Property values are normalized into a
//! small closed enum so the completion check is a plain boolean match rather
//! than a dynamic equality test against whatever the repository stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the boolean property that marks a todo item as done.
pub const COMPLETED: &str = "completed";

/// A typed property value. Serialized untagged, so it reads and writes the
/// plain JSON the repository renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Long(i64),
    Double(f64),
    String(String),
    Strings(Vec<String>),
}

impl PropertyValue {
    /// Convert a rendered JSON value. Objects, nulls and mixed arrays have no
    /// property representation and yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Long)
                .or_else(|| n.as_f64().map(Self::Double)),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self::Strings),
            Value::Null | Value::Object(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

pub type Properties = BTreeMap<String, PropertyValue>;

/// A node in the content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub path: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Resource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// True only when `completed` is present and is boolean `true`. A
    /// missing property, a string or a number all read as active.
    pub fn is_completed(&self) -> bool {
        matches!(self.properties.get(COMPLETED), Some(PropertyValue::Bool(true)))
    }
}
