//! Response panels, one per editor column.

use super::format::{format_duration, format_response};
use super::{CloseCallback, PreviewRenderer, RenderError};
use crate::document::ViewColumn;
use crate::models::HttpResponse;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};
use uuid::Uuid;

/// A panel showing one response.
#[derive(Debug, Clone)]
pub struct ResponsePanel {
    pub id: String,
    /// "Response(123ms)"
    pub title: String,
    pub content: String,
    pub status_code: u16,
    pub column: ViewColumn,
    pub created_at: DateTime<Utc>,
}

impl ResponsePanel {
    fn new(response: &HttpResponse, column: ViewColumn) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: format!("Response({})", format_duration(response.duration)),
            content: format_response(response),
            status_code: response.status_code,
            column,
            created_at: Utc::now(),
        }
    }
}

/// Shows responses in panels, reusing the panel of a column.
///
/// Rendering into a column that already holds a panel replaces it. Once the
/// last panel is closed the registered callbacks fire.
#[derive(Default)]
pub struct PanelView {
    panels: RwLock<HashMap<ViewColumn, ResponsePanel>>,
    on_close_all: Mutex<Vec<CloseCallback>>,
}

impl PanelView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The panel in `column`, if any.
    pub fn panel(&self, column: ViewColumn) -> Option<ResponsePanel> {
        self.panels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&column)
            .cloned()
    }

    /// Open panels ordered by column.
    pub fn panels(&self) -> Vec<ResponsePanel> {
        let mut panels: Vec<ResponsePanel> = self
            .panels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        panels.sort_by_key(|panel| panel.column);
        panels
    }

    /// Closes the panel in `column`.
    ///
    /// Returns false when there was none. Closing the last panel fires the
    /// close-all callbacks.
    pub fn close(&self, column: ViewColumn) -> bool {
        let now_empty = {
            let mut panels = self.panels.write().unwrap_or_else(PoisonError::into_inner);
            if panels.remove(&column).is_none() {
                return false;
            }
            panels.is_empty()
        };

        if now_empty {
            self.notify_all_closed();
        }
        true
    }

    /// Closes every panel and fires the close-all callbacks.
    pub fn close_all(&self) {
        self.panels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.notify_all_closed();
    }

    fn notify_all_closed(&self) {
        let callbacks = self
            .on_close_all
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        log::debug!("All response panels closed");
        for callback in callbacks.iter() {
            callback();
        }
    }
}

impl PreviewRenderer for PanelView {
    fn render(&self, response: &HttpResponse, column: ViewColumn) -> Result<(), RenderError> {
        let panel = ResponsePanel::new(response, column);
        log::debug!("Showing {} in {}", panel.title, column);
        self.panels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(column, panel);
        Ok(())
    }

    fn on_did_close_all(&self, callback: CloseCallback) {
        self.on_close_all
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(callback);
    }
}
