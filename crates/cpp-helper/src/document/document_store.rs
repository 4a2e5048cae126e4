use dashmap::DashMap;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};

use super::Document;

/// Thread-safe store of all open documents.
///
/// Uses `DashMap` internally so that all operations are safe to call
/// concurrently from any async task without external synchronisation.
#[derive(Debug)]
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open (register) a new document.
    pub fn open(
        &self,
        uri: Url,
        language_id: String,
        text: String,
        version: i32,
    ) {
        self.documents.insert(uri.clone(), Document::new(uri, language_id, text, version));
    }

    /// Apply incremental or full-content changes to an already-open document.
    pub fn apply_changes(
        &self,
        uri: &Url,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            doc.apply_changes(changes, version);
        }
    }

    /// Close (unregister) a document.
    pub fn close(
        &self,
        uri: &Url,
    ) {
        self.documents.remove(uri);
    }

    /// Return a clone of the full document text, if the URI is tracked.
    pub fn get_content(
        &self,
        uri: &Url,
    ) -> Option<String> {
        self.documents.get(uri).map(|r| r.value().text.clone())
    }

    /// Return a clone of the full `Document`, if the URI is tracked.
    pub fn get(
        &self,
        uri: &Url,
    ) -> Option<Document> {
        self.documents.get(uri).map(|r| r.value().clone())
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/document_store_tests.rs"]
mod tests;
