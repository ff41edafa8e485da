//! Error types for the view-model builders and the repository client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the node does not exist" from "the repository returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging.
//!
//! A missing `completed` property is never an error; it reads as "not
//! completed". The only failure the list builder surfaces is the one its
//! child source reports.

/// Errors returned by `RepositoryClient` and `build_list_model`.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The repository returned 404 for the requested node.
    #[error("resource not found")]
    NotFound,

    /// The repository returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// An action descriptor could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The action names an `append` field but the form supplied no value.
    #[error("no value supplied for form field `{0}`")]
    MissingFormValue(String),

    /// The child source failed to enumerate the page's children.
    #[error("child enumeration failed: {0}")]
    ChildEnumeration(String),
}
