//! Response preview surfaces.
//!
//! Two renderers are provided and the controller picks one per response from
//! `previewResponseInUntitledDocument`:
//!
//! - [`TextDocumentView`] formats the response as a plain-text document and
//!   writes it to a sink
//! - [`PanelView`] keeps one response panel per editor column

pub mod format;
pub mod panel;
pub mod text_document;

pub use format::{format_duration, format_response, format_size};
pub use panel::{PanelView, ResponsePanel};
pub use text_document::TextDocumentView;

use crate::document::ViewColumn;
use crate::models::HttpResponse;
use thiserror::Error;

/// Callback fired when every preview of a renderer has been closed.
pub type CloseCallback = Box<dyn Fn() + Send + Sync>;

/// Errors raised while showing a response.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The rendered text could not be written out.
    #[error("Failed to write response preview: {0}")]
    Io(#[from] std::io::Error),

    #[error("No surface available for {0}")]
    Unavailable(ViewColumn),
}

/// Shows a response to the user.
pub trait PreviewRenderer: Send + Sync {
    /// Shows `response` in `column`.
    fn render(&self, response: &HttpResponse, column: ViewColumn) -> Result<(), RenderError>;

    /// Registers a callback for when all previews are closed.
    ///
    /// Renderers without closable previews ignore it.
    fn on_did_close_all(&self, _callback: CloseCallback) {}
}
