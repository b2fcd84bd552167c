#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use crate::net::types::{Citation, DocumentData};

/// The document currently shown in the viewer, if any.
#[derive(Clone, Debug, Default)]
pub struct DocumentState {
    pub open: Option<DocumentData>,
}

impl DocumentState {
    /// Show the chunk a citation card refers to.
    pub fn open_citation(&mut self, citation: &Citation) {
        self.open = Some(DocumentData::from_citation(citation));
    }

    pub fn close(&mut self) {
        self.open = None;
    }
}

/// Split document text into paragraphs on blank lines.
pub fn paragraphs(content: &str) -> Vec<String> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}
