//! Error types for request block parsing.

use thiserror::Error;

/// Errors that can occur while parsing a request block.
///
/// Line numbers are 1-based and relative to the start of the block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Invalid or unsupported HTTP method.
    #[error("Invalid HTTP method '{method}' at line {line}. Expected one of: GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD, TRACE, CONNECT")]
    InvalidMethod {
        /// The invalid method string that was encountered
        method: String,
        line: usize,
    },

    /// URL that doesn't start with http:// or https://.
    #[error("Invalid URL '{url}' at line {line}. URL must start with http:// or https://")]
    InvalidUrl {
        /// The invalid URL string that was encountered
        url: String,
        line: usize,
    },

    /// Header line without a `Name: value` shape.
    #[error("Invalid header format '{header}' at line {line}. Expected format: 'Header-Name: value'")]
    InvalidHeader {
        /// The invalid header line that was encountered
        header: String,
        line: usize,
    },

    /// Request line with a method but no URL.
    #[error("Missing URL in request line at line {line}. Expected format: 'METHOD URL [HTTP/VERSION]'")]
    MissingUrl { line: usize },

    /// The block contains only comments and blank lines.
    #[error("Empty request block at line {line}")]
    EmptyRequest { line: usize },
}

impl ParseError {
    /// Returns the line number associated with this error.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidMethod { line, .. }
            | ParseError::InvalidUrl { line, .. }
            | ParseError::InvalidHeader { line, .. }
            | ParseError::MissingUrl { line }
            | ParseError::EmptyRequest { line } => *line,
        }
    }
}
