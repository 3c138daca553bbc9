//! Data models for request history.

use crate::models::{HttpMethod, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A sent request as recorded in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalHttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    /// Status of the response the request received.
    pub status_code: u16,
    /// When the record was made, in UTC.
    pub start_time: DateTime<Utc>,
}

impl HistoricalHttpRequest {
    /// Records `request` with the status of `response`, stamped now.
    pub fn new(request: &HttpRequest, response: &HttpResponse) -> Self {
        Self {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
            status_code: response.status_code,
            start_time: Utc::now(),
        }
    }
}

/// Errors raised by history storage.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// File I/O failed.
    #[error("History storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// A record could not be (de)serialized.
    #[error("History serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
