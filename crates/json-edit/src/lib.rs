//! json-edit - edit the scalar fields of one node of a JSON document and
//! write the result back at the node's path.
//!
//! The crate has two pure cores and the glue around them:
//!
//! - [`mutate`]: [`set_value_at_path`] returns a new document with one value
//!   replaced; every container on the path is rebuilt, nothing is mutated in
//!   place.
//! - [`coerce`]: [`parse_input_to_type`] reads edited text back as the kind
//!   of the field's original value, or fails with
//!   [`EditError::InvalidValue`].
//! - [`assemble`], [`node`], [`editor`]: build the value written by a save
//!   from a node snapshot and its edit buffer.
//! - [`store`]: [`DocumentStore`] owns the canonical document text and
//!   exposes [`DocumentStore::update_at_path`].

pub mod assemble;
pub mod coerce;
pub mod editor;
pub mod error;
pub mod mutate;
pub mod node;
pub mod store;

pub use assemble::{assemble_update, EditBuffer, EditKey};
pub use coerce::{format_value_for_input, parse_input_to_type};
pub use editor::NodeEditor;
pub use error::{EditError, EditResult};
pub use json_edit_path::{Path, PathSegment};
pub use mutate::{get_value_at_path, set_value_at_path};
pub use node::{Node, NodeShape, Row, RowKind};
pub use store::{to_canonical_text, DocumentStore, GraphSink, StoreConfig};
