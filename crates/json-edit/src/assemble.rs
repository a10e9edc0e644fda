//! Field-edit assembly: turn an edit buffer into the value written at a
//! node's path.

use indexmap::IndexMap;
use json_edit_path::{Path, PathSegment};
use serde_json::{Map, Value};

use crate::coerce::{format_value_for_input, parse_input_to_type};
use crate::error::EditResult;
use crate::mutate::{get_value_at_path, put_child, slot_index};
use crate::node::{NodeShape, Row};

/// Which input box a piece of edited text came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditKey {
    /// The node is a bare scalar and has no field key.
    Value,
    Field(String),
}

impl EditKey {
    pub fn for_row(row: &Row) -> Self {
        match &row.key {
            Some(key) => EditKey::Field(key.clone()),
            None => EditKey::Value,
        }
    }

    /// Label shown above the input box.
    pub fn label(&self) -> &str {
        match self {
            EditKey::Value => "value",
            EditKey::Field(key) => key,
        }
    }
}

impl From<&str> for EditKey {
    fn from(key: &str) -> Self {
        EditKey::Field(key.to_string())
    }
}

/// Edited text per input box, in row order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditBuffer(IndexMap<EditKey, String>);

impl EditBuffer {
    /// Seed the buffer with the current text of every primitive row.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Self {
        Self(
            rows.into_iter()
                .filter(|row| row.is_primitive())
                .map(|row| (EditKey::for_row(row), format_value_for_input(&row.value)))
                .collect(),
        )
    }

    pub fn get(&self, key: &EditKey) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: EditKey, text: impl Into<String>) {
        self.0.insert(key, text.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EditKey, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the value to write at `path` for a save on a node of `shape`.
///
/// Every edited row is coerced against its original value before anything is
/// built; the first failure is returned and nothing else happens. For a
/// container node the live value at `path` in `document` is the base, so
/// fields that are not rows of the node survive the save.
pub fn assemble_update(
    shape: &NodeShape,
    document: &Value,
    path: &Path,
    buffer: &EditBuffer,
) -> EditResult<Value> {
    match shape {
        NodeShape::Scalar(original) => match buffer.get(&EditKey::Value) {
            Some(text) => parse_input_to_type(text, Some(original)),
            None => Ok(original.clone()),
        },
        NodeShape::Fields(rows) => {
            let mut target = match get_value_at_path(document, path.segments()) {
                Some(current @ (Value::Array(_) | Value::Object(_))) => current.clone(),
                _ => Value::Object(Map::new()),
            };
            for row in rows {
                let Some(key) = &row.key else { continue };
                let Some(text) = buffer.get(&EditKey::Field(key.clone())) else {
                    continue;
                };
                let segment = PathSegment::key(key.as_str());
                // An array only takes keys that name one of its slots.
                if let Value::Array(items) = &target {
                    if slot_index(&segment, items.len()).is_none() {
                        continue;
                    }
                }
                let value = parse_input_to_type(text, Some(&row.value))?;
                put_child(&mut target, &segment, value);
            }
            Ok(target)
        }
    }
}
