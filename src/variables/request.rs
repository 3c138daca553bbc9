//! Value extraction from cached responses.
//!
//! A request variable reference names a part of a response and a path into
//! it:
//!
//! - `body.*` - the whole body as text
//! - `body.$.user.id` - a JSONPath into a JSON body
//! - `headers.Content-Type` - a response header, case-insensitive
//!
//! # Examples
//!
//! ```
//! use rest_runner::models::HttpResponse;
//! use rest_runner::variables::{extract_response_value, ResponsePart};
//!
//! let mut response = HttpResponse::new(200, "OK".to_string());
//! response.add_header("Content-Type".to_string(), "application/json".to_string());
//! response.set_body(br#"{"token": "abc123"}"#.to_vec());
//!
//! let token = extract_response_value(&response, ResponsePart::Body, "$.token").unwrap();
//! assert_eq!(token, "abc123");
//! ```

use super::VariableError;
use crate::models::HttpResponse;
use serde_json::Value as JsonValue;

/// Content type of a response body for extraction purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// application/json, application/*+json
    Json,
    /// application/xml, text/xml, application/*+xml
    Xml,
    Html,
    Text,
    /// Binary or unknown content.
    Binary,
}

impl ContentType {
    /// Determines the content type from a Content-Type header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rest_runner::variables::ContentType;
    ///
    /// assert_eq!(ContentType::from_header("application/json"), ContentType::Json);
    /// assert_eq!(ContentType::from_header("text/xml; charset=utf-8"), ContentType::Xml);
    /// ```
    pub fn from_header(content_type_header: &str) -> Self {
        let lower = content_type_header.to_lowercase();
        let media_type = lower.split(';').next().unwrap_or("").trim();

        if media_type.contains("json") {
            ContentType::Json
        } else if media_type.contains("xml") {
            ContentType::Xml
        } else if media_type.starts_with("text/html") {
            ContentType::Html
        } else if media_type.starts_with("text/") {
            ContentType::Text
        } else {
            ContentType::Binary
        }
    }

    /// Content type of a response; `None` when it has no Content-Type header.
    pub fn from_response(response: &HttpResponse) -> Option<Self> {
        response.content_type().map(Self::from_header)
    }
}

/// Part of a response a reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePart {
    Body,
    Headers,
}

impl ResponsePart {
    /// Parses `body` or `headers`.
    pub fn parse(part: &str) -> Option<Self> {
        match part {
            "body" => Some(ResponsePart::Body),
            "headers" => Some(ResponsePart::Headers),
            _ => None,
        }
    }
}

/// Extracts a value from a response.
///
/// # Arguments
///
/// * `response` - The cached response
/// * `part` - Body or headers
/// * `path` - `*` or a JSONPath for the body, a header name for headers
///
/// # Errors
///
/// `VariableError::UndefinedVariable` when the path points at nothing,
/// `VariableError::InvalidSyntax` when the body can't be queried with it.
pub fn extract_response_value(
    response: &HttpResponse,
    part: ResponsePart,
    path: &str,
) -> Result<String, VariableError> {
    match part {
        ResponsePart::Headers => extract_header_value(response, path),
        ResponsePart::Body if path.trim() == "*" => response.body_as_string().map_err(|_| {
            VariableError::InvalidSyntax("Response body is not valid UTF-8".to_string())
        }),
        ResponsePart::Body => {
            // untyped bodies are given a chance to parse as JSON
            match ContentType::from_response(response) {
                None | Some(ContentType::Json) => extract_json_value(response, path),
                Some(other) => Err(VariableError::InvalidSyntax(format!(
                    "JSONPath extraction requires JSON content type, got {:?}",
                    other
                ))),
            }
        }
    }
}

fn extract_header_value(response: &HttpResponse, header_name: &str) -> Result<String, VariableError> {
    response
        .header(header_name.trim())
        .map(str::to_string)
        .ok_or_else(|| {
            VariableError::UndefinedVariable(format!(
                "Header '{}' not found in response",
                header_name
            ))
        })
}

fn extract_json_value(response: &HttpResponse, path: &str) -> Result<String, VariableError> {
    let body_str = response
        .body_as_string()
        .map_err(|_| VariableError::InvalidSyntax("Response body is not valid UTF-8".to_string()))?;

    let json: JsonValue = serde_json::from_str(&body_str).map_err(|e| {
        VariableError::InvalidSyntax(format!("Failed to parse JSON response: {}", e))
    })?;

    let value = evaluate_jsonpath(&json, path)?;
    json_value_to_string(value)
}

/// Evaluates the supported JSONPath subset: `$`, `.field` and `[index]`.
fn evaluate_jsonpath(json: &JsonValue, path: &str) -> Result<JsonValue, VariableError> {
    let path = path.trim();
    let path = path
        .strip_prefix('$')
        .or_else(|| path.strip_prefix('@'))
        .unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);

    let mut current = json;
    for segment in parse_jsonpath_segments(path) {
        current = match segment {
            PathSegment::Field(name) => current.get(&name).ok_or_else(|| {
                VariableError::UndefinedVariable(format!("Field '{}' not found in JSON", name))
            })?,
            PathSegment::ArrayIndex(index) => current.get(index).ok_or_else(|| {
                VariableError::UndefinedVariable(format!("Array index {} out of bounds", index))
            })?,
        };
    }

    Ok(current.clone())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Field(String),
    ArrayIndex(usize),
}

/// Splits `items[0].id` into `[Field(items), ArrayIndex(0), Field(id)]`.
fn parse_jsonpath_segments(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }

                let index_str: String = chars.by_ref().take_while(|&c| c != ']').collect();
                let index_str = index_str.trim();
                match index_str.parse::<usize>() {
                    Ok(index) => segments.push(PathSegment::ArrayIndex(index)),
                    // ['quoted field']
                    Err(_) => segments.push(PathSegment::Field(
                        index_str.trim_matches(|c| c == '\'' || c == '"').to_string(),
                    )),
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Field(current));
    }

    segments
}

/// Strings are returned without quotes; objects and arrays as compact JSON.
fn json_value_to_string(value: JsonValue) -> Result<String, VariableError> {
    match value {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Null => Ok("null".to_string()),
        JsonValue::Array(_) | JsonValue::Object(_) => serde_json::to_string(&value).map_err(|e| {
            VariableError::InvalidSyntax(format!("Failed to serialize JSON value: {}", e))
        }),
    }
}
