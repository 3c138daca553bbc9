//! A `.http` file on disk run against a live HTTP server.
#![cfg(feature = "native")]

use async_trait::async_trait;
use rest_runner::config::RestClientConfig;
use rest_runner::controller::{Collaborators, LogStatusReporter, RequestController};
use rest_runner::document::FileDocument;
use rest_runner::executor::{ExecutionConfig, ReqwestTransport};
use rest_runner::history::JsonlHistoryStore;
use rest_runner::models::RequestRange;
use rest_runner::parser::HttpRequestParser;
use rest_runner::prompt::{Confirmation, UserPrompt};
use rest_runner::ui::TextDocumentView;
use rest_runner::variables::ResponseVariableCache;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CollectingPrompt(Mutex<Vec<String>>);

#[async_trait]
impl UserPrompt for CollectingPrompt {
    async fn confirm(&self, _message: &str) -> Confirmation {
        Confirmation::Yes
    }

    fn show_error(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

#[tokio::test]
async fn test_file_chain_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "abc"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "admin"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("api.http");
    std::fs::write(
        &file,
        format!(
            "# @name login\nPOST {0}/login\n\n###\n# @name profile\n# @before login\nGET {0}/profile\nAuthorization: Bearer {{{{login.response.body.$.token}}}}\n",
            server.uri()
        ),
    )
    .unwrap();

    let config = RestClientConfig::default();
    let history = JsonlHistoryStore::new(dir.path().join("history.jsonl"), 10);
    let view = Arc::new(TextDocumentView::new());
    let prompt = Arc::new(CollectingPrompt::default());
    let controller = RequestController::with_config(
        Collaborators {
            parser: Arc::new(HttpRequestParser),
            transport: Arc::new(ReqwestTransport::new(&ExecutionConfig::from(&config)).unwrap()),
            status: Arc::new(LogStatusReporter),
            prompt: prompt.clone(),
            text_view: view.clone(),
            panel_view: view.clone(),
            history: Arc::new(history.clone()),
            cache: Arc::new(ResponseVariableCache::new()),
        },
        config,
    );

    let document = FileDocument::open(&file).unwrap();
    controller.run(Arc::new(document), RequestRange::line(6)).await;

    assert!(prompt.0.lock().unwrap().is_empty());
    let documents = view.documents();
    assert_eq!(documents.len(), 2);
    assert!(documents[1].content.contains("\"name\": \"admin\""));

    let records = history.load().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].url.ends_with("/login"));
    assert_eq!(records[1].status_code, 200);
}
