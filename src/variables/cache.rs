//! Cache of the latest response of every named request.

use crate::document::DocumentId;
use crate::models::HttpResponse;
use dashmap::DashMap;

/// Most recent response per (document, request name).
///
/// Entries are overwritten on every successful completion of a named request
/// and never expire. The cache is shared between the controller, which
/// writes, and variable substitution, which reads; wrap it in an `Arc`.
#[derive(Debug, Default)]
pub struct ResponseVariableCache {
    responses: DashMap<(DocumentId, String), HttpResponse>,
}

impl ResponseVariableCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `response` as the latest response of `name` in `document`.
    pub fn add(&self, document: &DocumentId, name: &str, response: HttpResponse) {
        self.responses
            .insert((document.clone(), name.to_string()), response);
    }

    /// Returns the latest response of `name` in `document`.
    pub fn get(&self, document: &DocumentId, name: &str) -> Option<HttpResponse> {
        self.responses
            .get(&(document.clone(), name.to_string()))
            .map(|entry| entry.value().clone())
    }

    pub fn contains(&self, document: &DocumentId, name: &str) -> bool {
        self.responses
            .contains_key(&(document.clone(), name.to_string()))
    }

    /// Names with a cached response in `document`, sorted.
    pub fn names_for(&self, document: &DocumentId) -> Vec<String> {
        let mut names: Vec<String> = self
            .responses
            .iter()
            .filter(|entry| &entry.key().0 == document)
            .map(|entry| entry.key().1.clone())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
