//! HTTP request/response data and the collaborator that executes them.
//!
//! # Design
//! Requests and responses are plain data. `RecordClient` builds and parses
//! them without touching the network; an [`HttpClient`] executes them. Paths
//! are relative to the API root, so the same request runs against the live
//! API or a local mock depending only on the collaborator's base URL.

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path relative to the API root, including any query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Attach a JSON body and its content type.
    pub fn with_json(mut self, body: String) -> Self {
        self.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        self.body = Some(body);
        self
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The capability record operations run through.
///
/// Implementations execute one request and hand back whatever status the
/// server answered with. Only failures to obtain a response at all are
/// errors; a 4xx or 5xx is data. Authentication headers, TLS and timeouts
/// are the implementation's business.
pub trait HttpClient {
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    fn get(&self, path: &str) -> Result<HttpResponse, TransportError> {
        self.send_request(HttpRequest::new(HttpMethod::Get, path))
    }

    fn post(&self, path: &str, body: String) -> Result<HttpResponse, TransportError> {
        self.send_request(HttpRequest::new(HttpMethod::Post, path).with_json(body))
    }

    fn put(&self, path: &str, body: String) -> Result<HttpResponse, TransportError> {
        self.send_request(HttpRequest::new(HttpMethod::Put, path).with_json(body))
    }

    fn delete(&self, path: &str) -> Result<HttpResponse, TransportError> {
        self.send_request(HttpRequest::new(HttpMethod::Delete, path))
    }
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send_request(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send_request(request)
    }
}
