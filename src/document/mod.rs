//! Text documents holding request definitions.
//!
//! The controller reads documents through the [`TextSource`] trait: an editor
//! integration implements it over its buffers, the command-line driver uses
//! [`FileDocument`], and tests use [`InMemoryDocument`].

pub mod selector;

use crate::models::RequestRange;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Stable identity of a document, used to key cached responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates an identity from any string, typically a URI.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity of a document backed by a file.
    pub fn from_path(path: &Path) -> Self {
        Self(format!("file://{}", path.display()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Editor column a document or preview is shown in, counted from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewColumn(pub u8);

impl ViewColumn {
    /// The leftmost column.
    pub const ONE: ViewColumn = ViewColumn(1);

    /// The column to the right of this one.
    pub fn beside(self) -> ViewColumn {
        ViewColumn(self.0.saturating_add(1))
    }
}

impl Default for ViewColumn {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for ViewColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.0)
    }
}

/// Read access to a document containing request definitions.
pub trait TextSource: Send + Sync {
    /// Identity used to key cached responses.
    fn identity(&self) -> DocumentId;

    /// The complete current text of the document.
    fn full_text(&self) -> String;

    /// The current selection, if any.
    fn selection(&self) -> Option<String> {
        None
    }

    /// Line of the cursor, 0-based.
    fn cursor_line(&self) -> usize {
        0
    }

    /// Column the document is shown in.
    fn view_column(&self) -> ViewColumn {
        ViewColumn::ONE
    }

    /// Text of a request block.
    ///
    /// With a range, the delimited block containing its start line. Without
    /// one, the non-blank selection if there is one, else the delimited block
    /// around the cursor. `None` when the line is a delimiter.
    fn block_text(&self, range: Option<&RequestRange>) -> Option<String> {
        match range {
            Some(range) => selector::delimited_text(&self.full_text(), range.start_line),
            None => match self.selection().filter(|s| !s.trim().is_empty()) {
                Some(selection) => Some(selection),
                None => selector::delimited_text(&self.full_text(), self.cursor_line()),
            },
        }
    }
}

#[derive(Debug, Default)]
struct EditorState {
    text: String,
    selection: Option<String>,
    cursor_line: usize,
}

/// A document held entirely in memory.
#[derive(Debug)]
pub struct InMemoryDocument {
    id: DocumentId,
    column: ViewColumn,
    state: RwLock<EditorState>,
}

impl InMemoryDocument {
    /// Creates a document shown in the first column.
    pub fn new(id: impl Into<DocumentId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column: ViewColumn::ONE,
            state: RwLock::new(EditorState {
                text: text.into(),
                ..Default::default()
            }),
        }
    }

    /// Places the document in another column.
    pub fn with_view_column(mut self, column: ViewColumn) -> Self {
        self.column = column;
        self
    }

    /// Replaces the document text.
    pub fn set_text(&self, text: impl Into<String>) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).text = text.into();
    }

    /// Replaces the selection; `None` clears it.
    pub fn set_selection(&self, selection: Option<String>) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).selection = selection;
    }

    /// Moves the cursor to `line` (0-based).
    pub fn set_cursor_line(&self, line: usize) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).cursor_line = line;
    }
}

impl TextSource for InMemoryDocument {
    fn identity(&self) -> DocumentId {
        self.id.clone()
    }

    fn full_text(&self) -> String {
        self.state.read().unwrap_or_else(PoisonError::into_inner).text.clone()
    }

    fn selection(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .selection
            .clone()
    }

    fn cursor_line(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).cursor_line
    }

    fn view_column(&self) -> ViewColumn {
        self.column
    }
}

/// A document backed by a file on disk.
///
/// The file is re-read on every access so edits made between runs are seen.
/// When a re-read fails the last successfully read text is used.
#[derive(Debug)]
pub struct FileDocument {
    path: PathBuf,
    cursor_line: usize,
    last_read: RwLock<String>,
}

impl FileDocument {
    /// Opens `path`, failing if it can't be read.
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)?;
        Ok(Self {
            path,
            cursor_line: 0,
            last_read: RwLock::new(text),
        })
    }

    /// Places the cursor on `line` (0-based).
    pub fn with_cursor_line(mut self, line: usize) -> Self {
        self.cursor_line = line;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileDocument {
    fn identity(&self) -> DocumentId {
        DocumentId::from_path(&self.path)
    }

    fn full_text(&self) -> String {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                *self.last_read.write().unwrap_or_else(PoisonError::into_inner) = text.clone();
                text
            }
            Err(e) => {
                log::warn!(
                    "Failed to re-read {}: {}. Using the last read contents.",
                    self.path.display(),
                    e
                );
                self.last_read.read().unwrap_or_else(PoisonError::into_inner).clone()
            }
        }
    }

    fn cursor_line(&self) -> usize {
        self.cursor_line
    }
}
