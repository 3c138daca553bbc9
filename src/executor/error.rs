//! HTTP request execution error types.
//!
//! Transports report failures as [`RequestError`]. The controller only cares
//! about the coarse [`ErrorCode`] classification, which decides whether the
//! message shown to the user gets a configuration-aware explanation.

use std::fmt;
use thiserror::Error;

/// Coarse classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The remote host actively refused the connection.
    ConnectionRefused,
    /// No route to the remote network.
    NetworkUnreachable,
    /// Anything else.
    Other,
}

impl ErrorCode {
    /// Conventional upper-case name of the code, as used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Timeout => "ETIMEDOUT",
            ErrorCode::ConnectionRefused => "ECONNREFUSED",
            ErrorCode::NetworkUnreachable => "ENETUNREACH",
            ErrorCode::Other => "OTHER",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during HTTP request execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Request timed out before completion.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The connection was refused by the remote host.
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    /// The network of the remote host is unreachable.
    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    /// Any other network-level failure (DNS, reset connections, ...).
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The URL could not be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// TLS handshake or certificate failure.
    #[error("TLS/SSL error: {0}")]
    TlsError(String),

    /// The request could not be built from the parsed request data.
    #[error("Request build error: {0}")]
    BuildError(String),
}

impl RequestError {
    /// Classifies the error for message enrichment.
    pub fn code(&self) -> ErrorCode {
        match self {
            RequestError::Timeout(_) => ErrorCode::Timeout,
            RequestError::ConnectionRefused(_) => ErrorCode::ConnectionRefused,
            RequestError::NetworkUnreachable(_) => ErrorCode::NetworkUnreachable,
            _ => ErrorCode::Other,
        }
    }
}

/// Convert reqwest errors to RequestError.
///
/// reqwest wraps the socket error a few layers deep, so the source chain is
/// walked looking for the `std::io::Error` that carries the real cause.
#[cfg(feature = "native")]
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        use std::error::Error as _;
        use std::io::ErrorKind;

        let message = err.to_string();
        if err.is_timeout() {
            return RequestError::Timeout(message);
        }

        let mut source = err.source();
        while let Some(cause) = source {
            if let Some(io) = cause.downcast_ref::<std::io::Error>() {
                match io.kind() {
                    ErrorKind::TimedOut => return RequestError::Timeout(message),
                    ErrorKind::ConnectionRefused => return RequestError::ConnectionRefused(message),
                    ErrorKind::NetworkUnreachable => {
                        return RequestError::NetworkUnreachable(message)
                    }
                    _ => {}
                }
            }
            source = cause.source();
        }

        if err.is_builder() {
            RequestError::BuildError(message)
        } else if message.contains("certificate") || message.contains("TLS") {
            RequestError::TlsError(message)
        } else {
            RequestError::NetworkError(message)
        }
    }
}

/// Convert URL parsing errors to RequestError.
impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}
