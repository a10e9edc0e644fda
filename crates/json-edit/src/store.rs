//! Document Store - owner of the canonical document text.
//!
//! The text is the single source of truth. Each update parses it, runs the
//! path mutator, pretty-prints the result and hands the new text to the
//! graph collaborator supplied at construction.

use json_edit_path::Path;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::EditResult;
use crate::mutate::set_value_at_path;

/// Downstream view rebuilt from the document text (the structural graph).
pub trait GraphSink {
    fn rebuild(&mut self, text: &str);

    fn clear(&mut self) {}
}

/// No downstream view.
impl GraphSink for () {
    fn rebuild(&mut self, _text: &str) {}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Spaces per indentation level of the canonical text.
    pub indent: usize,
    /// Parsed in place of an empty document.
    pub empty_document: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            empty_document: "{}".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct DocumentStore<G: GraphSink = ()> {
    text: String,
    loading: bool,
    has_changes: bool,
    config: StoreConfig,
    graph: G,
}

impl<G: GraphSink> DocumentStore<G> {
    pub fn new(config: StoreConfig, graph: G) -> Self {
        Self {
            text: config.empty_document.clone(),
            loading: true,
            has_changes: false,
            config,
            graph,
        }
    }

    pub fn document_text(&self) -> &str {
        &self.text
    }

    /// Replace the document wholesale and rebuild the graph from it.
    pub fn set_document_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.loading = false;
        self.graph.rebuild(&self.text);
    }

    /// Parse the current text.
    pub fn snapshot(&self) -> EditResult<Value> {
        let current = if self.text.is_empty() {
            &self.config.empty_document
        } else {
            &self.text
        };
        Ok(serde_json::from_str(current)?)
    }

    /// Set `value` at `path` and return the new canonical text.
    ///
    /// When the stored text does not parse the store is left alone and the
    /// prior text is returned.
    pub fn update_at_path(&mut self, path: &Path, value: Value) -> String {
        let document = match self.snapshot() {
            Ok(document) => document,
            Err(err) => {
                warn!(path = %path, error = %err, "Stored document is malformed; update skipped");
                return self.text.clone();
            }
        };
        let next = set_value_at_path(&document, path.segments(), value);
        let text = match to_canonical_text(&next, self.config.indent) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path, error = %err, "Failed to serialize document; update skipped");
                return self.text.clone();
            }
        };
        debug!(path = %path, len = text.len(), "Document updated");
        self.text = text.clone();
        self.loading = false;
        self.has_changes = true;
        self.graph.rebuild(&self.text);
        text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.loading = false;
        self.graph.clear();
    }

    /// True until a document has been set, updated or cleared.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once an update has changed the text since the last
    /// [`mark_saved`](Self::mark_saved).
    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn mark_saved(&mut self) {
        self.has_changes = false;
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }
}

/// Pretty-print `value` with `indent` spaces per level.
pub fn to_canonical_text(value: &Value, indent: usize) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
