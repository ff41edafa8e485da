//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `RepositoryClient` builds
//! `HttpRequest` values (child enumeration, action POSTs) and parses
//! `HttpResponse` values; the host runs the actual round trip against the
//! content repository.

/// HTTP method for a request. The repository's read side is GET and every
/// write, including delete, goes through POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `RepositoryClient::build_*` methods. The caller executes it and
/// hands the resulting `HttpResponse` back to the matching `parse_*` method.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
