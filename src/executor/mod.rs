//! HTTP request execution.
//!
//! The controller never talks to the network directly. It hands every request
//! to a [`Transport`]; [`ReqwestTransport`] is the real implementation (behind
//! the `native` feature) and tests plug in their own.

pub mod cancellation;
pub mod config;
pub mod error;

#[cfg(feature = "native")]
pub mod native;

pub use cancellation::CancellationToken;
pub use config::ExecutionConfig;
pub use error::{ErrorCode, RequestError};

#[cfg(feature = "native")]
pub use native::ReqwestTransport;

use crate::config::RestClientConfig;
use crate::models::{HttpRequest, HttpResponse};
use async_trait::async_trait;

/// Sends requests over the wire.
///
/// Implementations must not look at the request's cancellation token; the
/// controller decides what to do with a response that arrives after cancel.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and waits for the complete response.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// Builds the message shown to the user when sending a request failed.
///
/// Timeouts, refused connections and unreachable networks get an explanation
/// of the likely cause. Everything else is reported as-is.
///
/// # Arguments
///
/// * `error` - The transport failure
/// * `config` - Configuration in effect, quoted in the timeout message
///
/// # Example
///
/// ```
/// use rest_runner::config::RestClientConfig;
/// use rest_runner::executor::{describe_failure, RequestError};
///
/// let message = describe_failure(
///     &RequestError::NetworkError("connection reset".to_string()),
///     &RestClientConfig::default(),
/// );
/// assert_eq!(message, "Network error: connection reset");
/// ```
pub fn describe_failure(error: &RequestError, config: &RestClientConfig) -> String {
    match error.code() {
        ErrorCode::Timeout => format!(
            "Request timed out. Double-check your network connection and/or raise the timeout \
             duration (currently set to {}ms) as needed: 'rest-client.timeoutinmilliseconds'. \
             Details: {}.",
            config.timeout_in_milliseconds, error
        ),
        ErrorCode::ConnectionRefused => format!(
            "The connection was rejected. Either the requested service isn't running on the \
             requested server/port, the proxy settings are misconfigured, or a firewall is \
             blocking requests. Details: {}.",
            error
        ),
        ErrorCode::NetworkUnreachable => format!(
            "You don't seem to be connected to a network. Details: {}",
            error
        ),
        ErrorCode::Other => error.to_string(),
    }
}
