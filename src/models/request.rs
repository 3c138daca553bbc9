//! HTTP request data models.
//!
//! This module defines the executable request produced from a request block,
//! including its method, headers, body, the optional `@name` binding and the
//! cancellation token that identifies one execution of it.

use crate::executor::cancellation::CancellationToken;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// HTTP request method.
///
/// Represents all standard HTTP methods as defined in RFC 7231 and RFC 5789.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP TRACE method - perform a message loop-back test
    TRACE,
    /// HTTP CONNECT method - establish a tunnel to the server
    CONNECT,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::TRACE => "TRACE",
            HttpMethod::CONNECT => "CONNECT",
        }
    }

    /// Parses a method token, ignoring case.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the token names a known method, `None` otherwise.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            "TRACE" => Some(HttpMethod::TRACE),
            "CONNECT" => Some(HttpMethod::CONNECT),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An executable HTTP request.
///
/// A request is one *instance* of an execution: cloning it keeps the same
/// cancellation token, so cancelling any clone cancels them all. Use
/// [`HttpRequest::renewed`] to obtain a fresh instance of the same request
/// (used when re-sending).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Unique identifier for this request.
    ///
    /// Kept across [`HttpRequest::renewed`] so log lines of a re-sent request
    /// can be correlated with the first send.
    pub id: String,

    /// HTTP method (GET, POST, PUT, DELETE, etc.).
    pub method: HttpMethod,

    /// Target URL, with request variables already substituted.
    pub url: String,

    /// Optional HTTP version from the request line, e.g. "HTTP/1.1".
    pub http_version: Option<String>,

    /// Request headers as written in the block plus configured defaults.
    pub headers: HashMap<String, String>,

    /// Optional request body.
    pub body: Option<String>,

    /// Name bound with `# @name <name>`; named responses are cached.
    pub name: Option<String>,

    #[serde(skip)]
    cancellation: CancellationToken,
}

impl HttpRequest {
    /// Creates a new request with a generated id and a fresh cancellation token.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `url` - Target URL
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            method,
            url,
            http_version: None,
            headers: HashMap::new(),
            body: None,
            name: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Binds the request to a name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a header to the request.
    ///
    /// # Arguments
    ///
    /// * `name` - Header name
    /// * `value` - Header value
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Sets the request body.
    pub fn set_body(&mut self, body: String) {
        self.body = Some(body);
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| !b.is_empty())
    }

    /// Looks up a header value, ignoring the case of the header name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Adds every header in `defaults` that the request doesn't already define.
    ///
    /// Header names are compared case-insensitively.
    pub fn apply_default_headers(&mut self, defaults: &HashMap<String, String>) {
        for (name, value) in defaults {
            if self.header(name).is_none() {
                self.headers.insert(name.clone(), value.clone());
            }
        }
    }

    /// Requests cancellation of this request instance.
    ///
    /// Cancellation is cooperative: the transport call is not interrupted, but
    /// the outcome is discarded once it returns.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns `true` once [`HttpRequest::cancel`] was called on this instance.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Returns the cancellation token tied to this instance.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Checks whether `other` is the same execution instance as `self`.
    pub fn is_same_instance(&self, other: &HttpRequest) -> bool {
        self.cancellation.same_token(&other.cancellation)
    }

    /// Returns a copy of this request with a new, uncancelled token.
    pub fn renewed(&self) -> Self {
        Self {
            cancellation: CancellationToken::new(),
            ..self.clone()
        }
    }
}
