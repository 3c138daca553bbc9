//! Shared fixtures for controller integration tests.

pub mod dependency_chain_test;
pub mod end_to_end_test;
pub mod lifecycle_test;

use async_trait::async_trait;
use rest_runner::config::RestClientConfig;
use rest_runner::controller::{Collaborators, RequestController, RequestState, StatusReporter};
use rest_runner::document::InMemoryDocument;
use rest_runner::executor::{RequestError, Transport};
use rest_runner::history::{HistoricalHttpRequest, HistoryError, HistoryStore};
use rest_runner::models::{HttpRequest, HttpResponse};
use rest_runner::parser::HttpRequestParser;
use rest_runner::prompt::{Confirmation, UserPrompt};
use rest_runner::ui::{PanelView, TextDocumentView};
use rest_runner::variables::ResponseVariableCache;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Answers every request with a JSON body numbering the sends.
///
/// The body is `{"url": <url>, "seq": <n>, "token": "token-<n>"}` with `n`
/// counting from 1.
#[derive(Default)]
pub struct ScriptedTransport {
    pub sent: Mutex<Vec<HttpRequest>>,
    sends: AtomicUsize,
    /// (started, release): when set, each send signals `started` and waits
    /// for `release`.
    pub gate: Option<(Notify, Notify)>,
    /// Per-path holds; a send to a held path waits until it is released.
    held: Mutex<HashMap<String, Arc<Notify>>>,
}

impl ScriptedTransport {
    pub fn gated() -> Self {
        Self {
            gate: Some((Notify::new(), Notify::new())),
            ..Default::default()
        }
    }

    /// Holds sends to `path` until the returned handle is notified.
    pub fn hold(&self, path: &str) -> Arc<Notify> {
        let release = Arc::new(Notify::new());
        self.held
            .lock()
            .unwrap()
            .insert(path.to_string(), Arc::clone(&release));
        release
    }

    pub fn sent_paths(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.trim_start_matches("https://api.test").to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        self.sent.lock().unwrap().push(request.clone());
        let seq = self.sends.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some((started, release)) = &self.gate {
            started.notify_one();
            release.notified().await;
        }

        let path = request.url.trim_start_matches("https://api.test").to_string();
        let hold = self.held.lock().unwrap().get(&path).cloned();
        if let Some(release) = hold {
            release.notified().await;
        }

        let body = serde_json::json!({
            "url": request.url,
            "seq": seq,
            "token": format!("token-{}", seq),
        });
        let mut response = HttpResponse::new(200, "OK".to_string());
        response.add_header("Content-Type".to_string(), "application/json".to_string());
        response.set_body(body.to_string().into_bytes());
        Ok(response)
    }
}

#[derive(Default)]
pub struct RecordingStatus(Mutex<Vec<RequestState>>);

impl RecordingStatus {
    pub fn states(&self) -> Vec<RequestState> {
        self.0.lock().unwrap().clone()
    }
}

impl StatusReporter for RecordingStatus {
    fn update(&self, state: RequestState, _response: Option<&HttpResponse>) {
        self.0.lock().unwrap().push(state);
    }
}

pub struct ScriptedPrompt {
    pub answer: Confirmation,
    pub questions: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

#[async_trait]
impl UserPrompt for ScriptedPrompt {
    async fn confirm(&self, message: &str) -> Confirmation {
        self.questions.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct MemoryHistory(pub Mutex<Vec<HistoricalHttpRequest>>);

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn add_to_history(&self, record: HistoricalHttpRequest) -> Result<(), HistoryError> {
        self.0.lock().unwrap().push(record);
        Ok(())
    }
}

/// A controller wired to in-memory collaborators, with handles to inspect
/// them.
pub struct TestBed {
    pub transport: Arc<ScriptedTransport>,
    pub status: Arc<RecordingStatus>,
    pub prompt: Arc<ScriptedPrompt>,
    pub panel_view: Arc<PanelView>,
    pub history: Arc<MemoryHistory>,
    pub cache: Arc<ResponseVariableCache>,
    pub controller: RequestController,
}

impl TestBed {
    pub fn new() -> Self {
        Self::with(ScriptedTransport::default(), Confirmation::Yes)
    }

    pub fn with(transport: ScriptedTransport, answer: Confirmation) -> Self {
        let transport = Arc::new(transport);
        let status = Arc::new(RecordingStatus::default());
        let prompt = Arc::new(ScriptedPrompt {
            answer,
            questions: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        });
        let panel_view = Arc::new(PanelView::new());
        let history = Arc::new(MemoryHistory::default());
        let cache = Arc::new(ResponseVariableCache::new());

        let collaborators = Collaborators {
            parser: Arc::new(HttpRequestParser),
            transport: transport.clone(),
            status: status.clone(),
            prompt: prompt.clone(),
            text_view: Arc::new(TextDocumentView::new()),
            panel_view: panel_view.clone(),
            history: history.clone(),
            cache: cache.clone(),
        };
        let controller = RequestController::with_config(collaborators, RestClientConfig::default());

        Self {
            transport,
            status,
            prompt,
            panel_view,
            history,
            cache,
            controller,
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.0.lock().unwrap().len()
    }

    pub fn errors(&self) -> Vec<String> {
        self.prompt.errors.lock().unwrap().clone()
    }
}

/// One named request block, optionally depending on `before`.
pub fn block(name: &str, before: Option<&str>) -> String {
    let mut text = format!("# @name {}\n", name);
    if let Some(before) = before {
        text.push_str(&format!("# @before {}\n", before));
    }
    text.push_str(&format!("GET https://api.test/{}\n", name));
    text
}

pub fn document(blocks: &[String]) -> Arc<InMemoryDocument> {
    Arc::new(InMemoryDocument::new("mem://scenario.http", blocks.join("###\n")))
}

/// Line (0-based) of the request line `GET https://api.test/<name>`.
pub fn request_line(text: &str, name: &str) -> usize {
    let needle = format!("GET https://api.test/{}", name);
    text.lines()
        .position(|line| line == needle)
        .unwrap_or_else(|| panic!("no request named {}", name))
}
