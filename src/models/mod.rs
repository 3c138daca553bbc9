//! Data models for HTTP requests, responses and request ranges.
//!
//! This module contains the core data structures shared by the parser, the
//! dependency resolver and the request controller.

pub mod range;
pub mod request;
pub mod response;

pub use range::RequestRange;
pub use request::{HttpMethod, HttpRequest};
pub use response::HttpResponse;
