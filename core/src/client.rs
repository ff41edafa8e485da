//! Stateless HTTP request builder and response parser for the content
//! repository.
//!
//! # Design
//! `RepositoryClient` holds only a `base_url` and carries no mutable state
//! between calls. Reads go through the repository's JSON rendering
//! (`<path>.1.json`, the node plus one level of children); writes replay an
//! `ActionDescriptor` as a form POST, the way the browser submits it. The
//! caller executes the actual HTTP round trip.

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::action::{ActionDescriptor, FieldValue};
use crate::error::ViewError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Properties, PropertyValue, Resource};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct RepositoryClient {
    base_url: String,
}

impl RepositoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET the node at `path` with its direct children inlined.
    pub fn build_get_resource(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}.1.json", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Replay `action` as the form POST the browser would send. `appended`
    /// is the value of the form field named by `action.append`.
    pub fn build_post_action(
        &self,
        action: &ActionDescriptor,
        appended: Option<&str>,
    ) -> Result<HttpRequest, ViewError> {
        let mut form = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &action.data {
            match value {
                FieldValue::Text(text) => {
                    form.append_pair(name, text);
                }
                FieldValue::Flag(flag) => {
                    form.append_pair(name, if *flag { "true" } else { "false" });
                }
                FieldValue::Paths(paths) => {
                    for path in paths {
                        form.append_pair(name, path);
                    }
                }
            }
        }
        if let Some(field) = &action.append {
            let value = appended.ok_or_else(|| ViewError::MissingFormValue(field.clone()))?;
            form.append_pair(field, value);
        }

        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{}", self.base_url, action.path),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(form.finish()),
        })
    }

    /// The node itself, with its scalar properties.
    pub fn parse_resource(&self, path: &str, response: HttpResponse) -> Result<Resource, ViewError> {
        let node = parse_node(&response)?;
        Ok(Resource {
            path: path.to_string(),
            properties: properties_of(&node),
        })
    }

    /// The node's children in rendered order. Every object-valued entry of
    /// the rendering is a child named by its key.
    pub fn parse_children(
        &self,
        parent_path: &str,
        response: HttpResponse,
    ) -> Result<Vec<Resource>, ViewError> {
        let node = parse_node(&response)?;
        let parent = parent_path.trim_end_matches('/');
        Ok(node
            .iter()
            .filter_map(|(name, value)| value.as_object().map(|child| (name, child)))
            .map(|(name, child)| Resource {
                path: format!("{parent}/{name}"),
                properties: properties_of(child),
            })
            .collect())
    }

    pub fn parse_post_action(&self, response: HttpResponse) -> Result<(), ViewError> {
        match response.status {
            200 | 201 => Ok(()),
            _ => check_status(&response, 200),
        }
    }
}

fn parse_node(response: &HttpResponse) -> Result<Map<String, Value>, ViewError> {
    check_status(response, 200)?;
    match serde_json::from_str(&response.body) {
        Ok(Value::Object(node)) => Ok(node),
        Ok(_) => Err(ViewError::DeserializationError("expected a JSON object".to_string())),
        Err(e) => Err(ViewError::DeserializationError(e.to_string())),
    }
}

fn properties_of(node: &Map<String, Value>) -> Properties {
    node.iter()
        .filter_map(|(name, value)| PropertyValue::from_json(value).map(|v| (name.clone(), v)))
        .collect()
}

/// Map non-success status codes to the appropriate `ViewError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ViewError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ViewError::NotFound);
    }
    Err(ViewError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
