//! Request status reporting.

use crate::models::HttpResponse;
use crate::ui::{format_duration, format_size};
use std::fmt;

/// Lifecycle state of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestState {
    /// Accepted, about to be sent.
    Pending,
    /// Handed to the transport.
    Sent,
    Received,
    Error,
    Cancelled,
    /// Every response preview was closed.
    Closed,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestState::Pending => "Pending",
            RequestState::Sent => "Sent",
            RequestState::Received => "Received",
            RequestState::Error => "Error",
            RequestState::Cancelled => "Cancelled",
            RequestState::Closed => "Closed",
        };
        f.write_str(name)
    }
}

/// Receives request state transitions, e.g. to drive a status bar.
pub trait StatusReporter: Send + Sync {
    fn update(&self, state: RequestState, response: Option<&HttpResponse>);
}

/// Text shown for a state. Empty for [`RequestState::Closed`].
///
/// # Examples
///
/// ```
/// use rest_runner::controller::{status_text, RequestState};
///
/// assert_eq!(status_text(RequestState::Pending, None), "Waiting");
/// assert_eq!(status_text(RequestState::Closed, None), "");
/// ```
pub fn status_text(state: RequestState, response: Option<&HttpResponse>) -> String {
    match (state, response) {
        (RequestState::Pending, _) => "Waiting".to_string(),
        (RequestState::Sent, _) => "Sending".to_string(),
        (RequestState::Received, Some(response)) => format!(
            "{} {} | {} | {}",
            response.status_code,
            response.status_text,
            format_duration(response.duration),
            format_size(response.size)
        ),
        (RequestState::Received, None) => "Received".to_string(),
        (RequestState::Error, _) => "Error".to_string(),
        (RequestState::Cancelled, _) => "Cancelled".to_string(),
        (RequestState::Closed, _) => String::new(),
    }
}

/// Reports every transition to the log at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogStatusReporter;

impl StatusReporter for LogStatusReporter {
    fn update(&self, state: RequestState, response: Option<&HttpResponse>) {
        log::info!("[{}] {}", state, status_text(state, response));
    }
}
