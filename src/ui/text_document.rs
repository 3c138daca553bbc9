//! Responses rendered as untitled text documents.

use super::format::format_response;
use super::{PreviewRenderer, RenderError};
use crate::document::ViewColumn;
use crate::models::HttpResponse;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// A rendered response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub column: ViewColumn,
    pub content: String,
}

/// Opens every response as a new plain-text document.
///
/// Documents are kept in memory and, when a sink is attached, also written
/// to it (the command-line driver passes stdout).
pub struct TextDocumentView {
    documents: Mutex<Vec<RenderedDocument>>,
    sink: Option<Mutex<Box<dyn Write + Send>>>,
}

impl TextDocumentView {
    /// A view keeping documents in memory only.
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            sink: None,
        }
    }

    /// A view that also writes every document to `sink`.
    pub fn with_sink(sink: impl Write + Send + 'static) -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            sink: Some(Mutex::new(Box::new(sink))),
        }
    }

    /// Documents rendered so far, oldest first.
    pub fn documents(&self) -> Vec<RenderedDocument> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for TextDocumentView {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewRenderer for TextDocumentView {
    fn render(&self, response: &HttpResponse, column: ViewColumn) -> Result<(), RenderError> {
        let content = format_response(response);

        if let Some(sink) = &self.sink {
            let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
            sink.write_all(content.as_bytes())?;
            sink.flush()?;
        }

        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RenderedDocument { column, content });
        Ok(())
    }
}
