//! Edit session for one selected node.

use json_edit_path::PathSegment;
use serde_json::Value;
use tracing::debug;

use crate::assemble::{assemble_update, EditBuffer, EditKey};
use crate::error::{EditError, EditResult};
use crate::mutate::child;
use crate::node::{Node, NodeShape, Row};
use crate::store::{DocumentStore, GraphSink};

/// Holds the edit buffer for a node between "Edit" and "Save"/"Cancel".
///
/// A failed save keeps the session in edit mode with the typed text intact
/// and records the error message; only [`cancel`](Self::cancel) restores the
/// original values. A successful save makes the saved values the new
/// originals.
#[derive(Clone, Debug)]
pub struct NodeEditor {
    node: Node,
    shape: NodeShape,
    original: EditBuffer,
    buffer: EditBuffer,
    editing: bool,
    error: Option<String>,
}

impl NodeEditor {
    pub fn open(node: Node) -> Self {
        let shape = node.shape();
        let original = EditBuffer::from_rows(&shape.editable_rows());
        Self {
            buffer: original.clone(),
            original,
            shape,
            node,
            editing: false,
            error: None,
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn shape(&self) -> &NodeShape {
        &self.shape
    }

    pub fn can_edit(&self) -> bool {
        !self.original.is_empty()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Enter edit mode. Returns false for nodes with nothing to edit.
    pub fn begin_edit(&mut self) -> bool {
        self.editing = self.can_edit();
        self.editing
    }

    pub fn set_field(&mut self, key: EditKey, text: impl Into<String>) {
        self.buffer.set(key, text);
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Message of the last failed save.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Coerce every field, write the result into `store` and leave edit mode.
    /// Returns the new document text.
    pub fn save<G: GraphSink>(&mut self, store: &mut DocumentStore<G>) -> EditResult<String> {
        if !self.editing {
            return Err(EditError::NotEditing);
        }
        self.error = None;
        let assembled = store.snapshot().and_then(|document| {
            assemble_update(&self.shape, &document, &self.node.path, &self.buffer)
        });
        match assembled {
            Ok(value) => {
                let text = store.update_at_path(&self.node.path, value.clone());
                self.refresh(&value);
                self.editing = false;
                debug!(path = %self.node.path, "Node saved");
                Ok(text)
            }
            Err(err) => {
                debug!(path = %self.node.path, error = %err, "Node save rejected");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Carry `saved` (the value written at the node's path) into the
    /// snapshot and reseed both buffers from it.
    fn refresh(&mut self, saved: &Value) {
        let scalar = matches!(self.shape, NodeShape::Scalar(_));
        for row in self.node.rows.iter_mut().filter(|row| row.is_primitive()) {
            match row.key.clone() {
                None if scalar => *row = Row::bare(saved.clone()),
                Some(key) if !scalar => {
                    if let Some(value) = child(saved, &PathSegment::key(key.as_str())) {
                        *row = Row::keyed(key, value.clone());
                    }
                }
                _ => {}
            }
        }
        self.shape = self.node.shape();
        self.original = EditBuffer::from_rows(&self.shape.editable_rows());
        self.buffer = self.original.clone();
    }

    /// Drop the typed text and leave edit mode.
    pub fn cancel(&mut self) {
        self.buffer = self.original.clone();
        self.error = None;
        self.editing = false;
    }

    /// Read-only content for the node.
    pub fn content_text(&self) -> String {
        self.node.display_text()
    }

    /// The node's location, `$["a"][0]` style.
    pub fn path_text(&self) -> String {
        self.node.path.to_string()
    }
}
