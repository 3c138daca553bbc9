//! Request execution coordinator.
//!
//! [`RequestController`] runs the request under a range together with every
//! request it depends on through `@before`, one after the other. It owns the
//! "last request" and "last pending request" slots used by
//! [`RequestController::rerun`] and [`RequestController::cancel`], caches the
//! responses of named requests, previews responses and hands them to history.
//!
//! Nothing escapes the controller: transport, parse and render failures are
//! logged and shown to the user through [`UserPrompt::show_error`].

pub mod status;
pub mod trace;

pub use status::{status_text, LogStatusReporter, RequestState, StatusReporter};
pub use trace::traced;

use crate::config::{get_config, PreviewColumn, RestClientConfig};
use crate::dependency::build_dependency_order;
use crate::document::{TextSource, ViewColumn};
use crate::executor::{describe_failure, Transport};
use crate::history::{HistoricalHttpRequest, HistoryStore};
use crate::models::{HttpRequest, HttpResponse, RequestRange};
use crate::parser::{select_request, RequestParser};
use crate::prompt::{confirmation_message, UserPrompt};
use crate::ui::PreviewRenderer;
use crate::variables::{substitute_request_variables, ResponseVariableCache};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Everything the controller talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub parser: Arc<dyn RequestParser>,
    pub transport: Arc<dyn Transport>,
    pub status: Arc<dyn StatusReporter>,
    pub prompt: Arc<dyn UserPrompt>,
    /// Renderer used when `previewResponseInUntitledDocument` is set.
    pub text_view: Arc<dyn PreviewRenderer>,
    /// Renderer used otherwise.
    pub panel_view: Arc<dyn PreviewRenderer>,
    pub history: Arc<dyn HistoryStore>,
    /// Shared with variable substitution; may outlive the controller.
    pub cache: Arc<ResponseVariableCache>,
}

#[derive(Default)]
struct ControllerState {
    last_request: Option<HttpRequest>,
    last_pending: Option<HttpRequest>,
    last_document: Option<Arc<dyn TextSource>>,
}

/// Runs requests and their dependencies.
pub struct RequestController {
    collaborators: Collaborators,
    config: RestClientConfig,
    state: Mutex<ControllerState>,
}

impl RequestController {
    /// Creates a controller using a snapshot of the global configuration.
    pub fn new(collaborators: Collaborators) -> Self {
        Self::with_config(collaborators, get_config())
    }

    /// Creates a controller with an explicit configuration.
    ///
    /// Closing every response panel sets the status to
    /// [`RequestState::Closed`].
    pub fn with_config(collaborators: Collaborators, config: RestClientConfig) -> Self {
        let status = Arc::clone(&collaborators.status);
        collaborators
            .panel_view
            .on_did_close_all(Box::new(move || status.update(RequestState::Closed, None)));

        Self {
            collaborators,
            config,
            state: Mutex::new(ControllerState::default()),
        }
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Runs the request at `range` of `document` after its dependencies.
    ///
    /// Dependencies run in reverse discovery order, so the deepest ones go
    /// first. A dependency cycle runs the target alone.
    pub async fn run(&self, document: Arc<dyn TextSource>, range: RequestRange) {
        traced("run", async {
            self.lock_state().last_document = Some(Arc::clone(&document));

            let dependencies = build_dependency_order(document.as_ref(), &range);
            if !dependencies.is_empty() {
                log::debug!(
                    "Running {} dependencies of the request at {}",
                    dependencies.len(),
                    range
                );
            }

            for dependency in dependencies.iter().rev() {
                self.request(document.as_ref(), dependency).await;
            }
            self.request(document.as_ref(), &range).await;
        })
        .await
    }

    /// Sends the request defined in the block containing `range`.
    ///
    /// Requests marked with `@note` are only sent after the user answers
    /// yes. Request variables are substituted from cached responses before
    /// the block is parsed.
    pub async fn request(&self, document: &dyn TextSource, range: &RequestRange) {
        let Some(block) = document.block_text(Some(range)) else {
            log::debug!("No request block at {}", range);
            return;
        };
        let Some(selected) = select_request(&block) else {
            log::debug!("Block at {} holds no request", range);
            return;
        };

        if selected.warn_before_send {
            let message = confirmation_message(selected.name.as_deref());
            if !self.collaborators.prompt.confirm(&message).await.is_affirmative() {
                log::info!("Request at {} not confirmed; skipping", range);
                return;
            }
        }

        let text = substitute_request_variables(
            &selected.text,
            &document.identity(),
            &self.collaborators.cache,
        );

        let descriptor = match self.collaborators.parser.parse(&text) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                log::error!("Failed to parse request at {}: {}", range, e);
                self.collaborators.prompt.show_error(&e.to_string());
                return;
            }
        };

        let mut request = descriptor.into_request();
        request.apply_default_headers(&self.config.default_headers);
        self.run_core(request, Some(document)).await;
    }

    /// Sends the last request again without re-reading its document.
    ///
    /// Does nothing when no request was sent yet.
    pub async fn rerun(&self) {
        traced("rerun", async {
            let last = self.lock_state().last_request.clone();
            match last {
                Some(request) => self.run_core(request.renewed(), None).await,
                None => log::debug!("No previous request to rerun"),
            }
        })
        .await
    }

    /// Cancels the request in flight, if any.
    ///
    /// The transport call is not interrupted; its outcome is discarded.
    pub async fn cancel(&self) {
        traced("cancel", async {
            let pending = self.lock_state().last_pending.clone();
            if let Some(request) = pending {
                request.cancel();
                self.collaborators
                    .status
                    .update(RequestState::Cancelled, None);
            }
        })
        .await
    }

    /// Cancels anything in flight and resets the status to closed.
    pub fn dispose(&self) {
        if let Some(request) = self.lock_state().last_pending.take() {
            request.cancel();
        }
        self.collaborators.status.update(RequestState::Closed, None);
    }

    /// The request most recently handed to the transport.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.lock_state().last_request.clone()
    }

    pub fn has_pending_request(&self) -> bool {
        self.lock_state().last_pending.is_some()
    }

    /// The document of the most recent [`RequestController::run`].
    pub fn last_document(&self) -> Option<Arc<dyn TextSource>> {
        self.lock_state().last_document.clone()
    }

    /// Sends one request and handles its outcome.
    ///
    /// `document` is the document the request came from; without it the
    /// response isn't cached and the preview column follows the last used
    /// document.
    pub async fn run_core(&self, request: HttpRequest, document: Option<&dyn TextSource>) {
        self.collaborators.status.update(RequestState::Pending, None);
        {
            let mut state = self.lock_state();
            state.last_request = Some(request.clone());
            state.last_pending = Some(request.clone());
        }

        self.send(&request, document).await;

        let mut state = self.lock_state();
        if state
            .last_pending
            .as_ref()
            .is_some_and(|pending| pending.is_same_instance(&request))
        {
            state.last_pending = None;
        }
    }

    async fn send(&self, request: &HttpRequest, document: Option<&dyn TextSource>) {
        self.collaborators.status.update(RequestState::Sent, None);
        log::debug!("Sending {} {}", request.method, request.url);

        let result = self.collaborators.transport.send(request).await;

        if request.is_cancelled() {
            log::debug!("Request {} was cancelled; dropping its outcome", request.id);
            return;
        }

        match result {
            Ok(response) => self.handle_response(request, response, document).await,
            Err(e) => {
                self.collaborators.status.update(RequestState::Error, None);
                let message = describe_failure(&e, &self.config);
                log::error!("Failed to send request: {}", message);
                self.collaborators.prompt.show_error(&message);
            }
        }
    }

    async fn handle_response(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
        document: Option<&dyn TextSource>,
    ) {
        self.collaborators
            .status
            .update(RequestState::Received, Some(&response));

        if let (Some(name), Some(document)) = (request.name.as_deref(), document) {
            self.collaborators
                .cache
                .add(&document.identity(), name, response.clone());
        }

        self.preview(&response, document);

        let record = HistoricalHttpRequest::new(request, &response);
        if let Err(e) = self.collaborators.history.add_to_history(record).await {
            log::warn!("Failed to save request to history: {}", e);
        }
    }

    fn preview(&self, response: &HttpResponse, document: Option<&dyn TextSource>) {
        let column = self.preview_column(document);
        let renderer = if self.config.preview_response_in_untitled_document {
            &self.collaborators.text_view
        } else {
            &self.collaborators.panel_view
        };

        if let Err(e) = renderer.render(response, column) {
            log::error!("Unable to preview response: {}", e);
            self.collaborators.prompt.show_error(&e.to_string());
        }
    }

    fn preview_column(&self, document: Option<&dyn TextSource>) -> ViewColumn {
        let active = match document {
            Some(document) => document.view_column(),
            None => self
                .lock_state()
                .last_document
                .as_ref()
                .map_or(ViewColumn::ONE, |document| document.view_column()),
        };

        match self.config.preview_column {
            PreviewColumn::Current => active,
            PreviewColumn::Beside => active.beside(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
