//! Request block parser.
//!
//! A request block is the text between two `###` delimiters:
//!
//! ```http
//! # @name login
//! # @note
//! POST https://api.example.com/login HTTP/1.1
//! Content-Type: application/json
//!
//! {"user": "alice"}
//! ```
//!
//! [`select_request`] reads the markers and decides whether the block holds a
//! request at all; a [`RequestParser`] turns the block into a
//! [`ParsedRequestDescriptor`].

pub mod error;
pub mod markers;

pub use error::ParseError;

use crate::models::{HttpMethod, HttpRequest};
use markers::{is_comment_line, NAME_REGEX, NOTE_REGEX};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static REQUEST_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\s+(\S+)(?:\s+(HTTP/\d+(?:\.\d+)?))?$")
        .expect("Failed to compile request line regex")
});

/// A request block picked from a document, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRequest {
    /// Block text with surrounding blank lines removed.
    pub text: String,
    /// Name bound with `@name`.
    pub name: Option<String>,
    /// Set by a bare `@note` line.
    pub warn_before_send: bool,
}

/// Reads the markers of a request block.
///
/// # Returns
///
/// `None` when the block holds nothing but comments and blank lines.
pub fn select_request(block: &str) -> Option<SelectedRequest> {
    let has_request_line = block
        .lines()
        .any(|line| !line.trim().is_empty() && !is_comment_line(line));
    if !has_request_line {
        return None;
    }

    Some(SelectedRequest {
        text: block.trim_matches(['\n', '\r']).to_string(),
        name: NAME_REGEX
            .captures(block)
            .map(|caps| caps[1].to_string()),
        warn_before_send: NOTE_REGEX.is_match(block),
    })
}

/// Everything parsed out of one request block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequestDescriptor {
    /// The block text the descriptor was parsed from.
    pub text: String,
    pub name: Option<String>,
    pub warn_before_send: bool,
    pub method: HttpMethod,
    pub url: String,
    pub http_version: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl ParsedRequestDescriptor {
    /// Turns the descriptor into an executable request with a fresh id and
    /// cancellation token.
    pub fn into_request(self) -> HttpRequest {
        let mut request = HttpRequest::new(self.method, self.url);
        request.http_version = self.http_version;
        request.headers = self.headers;
        request.body = self.body;
        request.name = self.name;
        request
    }
}

/// Parses request blocks.
pub trait RequestParser: Send + Sync {
    /// Parses one block of request text.
    fn parse(&self, block: &str) -> Result<ParsedRequestDescriptor, ParseError>;
}

/// Parser for the `.http` request syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRequestParser;

impl RequestParser for HttpRequestParser {
    fn parse(&self, block: &str) -> Result<ParsedRequestDescriptor, ParseError> {
        let selected = select_request(block).ok_or(ParseError::EmptyRequest { line: 1 })?;
        let lines: Vec<(usize, &str)> = block
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .collect();

        let (method, url, http_version, headers, body) = parse_request(&lines)?;

        Ok(ParsedRequestDescriptor {
            text: selected.text,
            name: selected.name,
            warn_before_send: selected.warn_before_send,
            method,
            url,
            http_version,
            headers,
            body,
        })
    }
}

type RequestParts = (
    HttpMethod,
    String,
    Option<String>,
    HashMap<String, String>,
    Option<String>,
);

/// Parses the lines of a block into request line, headers and body.
///
/// # Arguments
///
/// * `lines` - (line_number, line_content) tuples, 1-based
fn parse_request(lines: &[(usize, &str)]) -> Result<RequestParts, ParseError> {
    let request_index = lines
        .iter()
        .position(|(_, line)| !line.trim().is_empty() && !is_comment_line(line))
        .ok_or(ParseError::EmptyRequest { line: 1 })?;

    let (request_line_num, request_line) = lines[request_index];
    let (method, url, http_version) = parse_request_line(request_line, request_line_num)?;

    let mut header_lines = Vec::new();
    let mut body_start_idx = None;

    for (idx, (line_num, line)) in lines.iter().enumerate().skip(request_index + 1) {
        if is_comment_line(line) {
            continue;
        }

        // first blank line ends the headers
        if line.trim().is_empty() {
            body_start_idx = Some(idx + 1);
            break;
        }

        header_lines.push((*line_num, *line));
    }

    let headers = extract_headers(&header_lines)?;

    let body = body_start_idx.and_then(|start_idx| {
        let body_lines: Vec<&str> = lines[start_idx..]
            .iter()
            .map(|(_, line)| *line)
            .filter(|line| !is_comment_line(line))
            .collect();
        extract_body(&body_lines)
    });

    Ok((method, url, http_version, headers, body))
}

/// Parses the request line to extract method, URL, and optional HTTP version.
///
/// Supports both formats:
/// - Simple: `GET https://example.com`
/// - Full: `GET https://example.com HTTP/1.1`
///
/// # Arguments
///
/// * `line` - The request line text
/// * `line_num` - Line number for error reporting
pub fn parse_request_line(
    line: &str,
    line_num: usize,
) -> Result<(HttpMethod, String, Option<String>), ParseError> {
    let trimmed = line.trim();

    if let Some(captures) = REQUEST_LINE_REGEX.captures(trimmed) {
        let method_str = &captures[1];
        let method = HttpMethod::parse(method_str).ok_or(ParseError::InvalidMethod {
            method: method_str.to_string(),
            line: line_num,
        })?;

        let url = &captures[2];
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ParseError::InvalidUrl {
                url: url.to_string(),
                line: line_num,
            });
        }

        let http_version = captures.get(3).map(|m| m.as_str().to_string());

        Ok((method, url.to_string(), http_version))
    } else {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(ParseError::MissingUrl { line: line_num });
        }

        if HttpMethod::parse(parts[0]).is_none() {
            return Err(ParseError::InvalidMethod {
                method: parts[0].to_string(),
                line: line_num,
            });
        }

        Err(ParseError::InvalidUrl {
            url: parts[1].to_string(),
            line: line_num,
        })
    }
}

/// Extracts headers from `Name: Value` lines.
pub fn extract_headers(lines: &[(usize, &str)]) -> Result<HashMap<String, String>, ParseError> {
    let mut headers = HashMap::new();

    for (line_num, line) in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                headers.insert(name.trim().to_string(), value.trim().to_string());
            }
            _ => {
                return Err(ParseError::InvalidHeader {
                    header: trimmed.to_string(),
                    line: *line_num,
                });
            }
        }
    }

    Ok(headers)
}

/// Joins body lines, returning `None` for an all-blank body.
pub fn extract_body(lines: &[&str]) -> Option<String> {
    let body = lines.join("\n");
    let body = body.trim_end();

    if body.trim().is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}
