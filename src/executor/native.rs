//! Native HTTP transport using reqwest.
//!
//! Only compiled with the `native` feature, which the command-line driver
//! enables.

use crate::executor::config::ExecutionConfig;
use crate::executor::error::RequestError;
use crate::executor::Transport;
use crate::models::{HttpMethod, HttpRequest, HttpResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Instant;

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport honouring the timeout and redirect settings.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::BuildError` if the TLS backend can't be initialised.
    pub fn new(config: &ExecutionConfig) -> Result<Self, RequestError> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects as usize)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(redirect)
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        Ok(Self { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        HttpMethod::TRACE => reqwest::Method::TRACE,
        HttpMethod::CONNECT => reqwest::Method::CONNECT,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let url = url::Url::parse(&request.url)?;
        let start_time = Instant::now();

        let mut req_builder = self
            .client
            .request(to_reqwest_method(request.method), url);

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        log::debug!("{} {}", request.method, request.url);
        let response = req_builder.send().await?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(name.as_str().to_string(), value_str.to_string());
            }
        }

        let body = response.bytes().await?.to_vec();

        let mut http_response = HttpResponse::new(status.as_u16(), status_text);
        http_response.headers = headers;
        http_response.set_body(body);
        http_response.duration = start_time.elapsed();

        Ok(http_response)
    }
}
