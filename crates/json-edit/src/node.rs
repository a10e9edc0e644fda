//! Node snapshots handed over by the visualization layer.
//!
//! A node is a path plus the rows drawn for it. Only primitive rows are
//! editable; container rows are links to child nodes. The editable shape is
//! decided once, when the snapshot is taken, as a [`NodeShape`].

use json_edit_path::Path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coerce::format_value_for_input;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl RowKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => RowKind::Null,
            Value::Bool(_) => RowKind::Boolean,
            Value::Number(_) => RowKind::Number,
            Value::String(_) => RowKind::String,
            Value::Array(_) => RowKind::Array,
            Value::Object(_) => RowKind::Object,
        }
    }

    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, RowKind::Array | RowKind::Object)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RowKind::Null => "null",
            RowKind::Boolean => "boolean",
            RowKind::Number => "number",
            RowKind::String => "string",
            RowKind::Array => "array",
            RowKind::Object => "object",
        }
    }
}

/// One line of a node: an optional field key and the value under it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub key: Option<String>,
    pub value: Value,
    pub kind: RowKind,
}

impl Row {
    pub fn new(key: Option<String>, value: Value) -> Self {
        let kind = RowKind::of(&value);
        Self { key, value, kind }
    }

    pub fn keyed(key: impl Into<String>, value: Value) -> Self {
        Self::new(Some(key.into()), value)
    }

    /// A row without a key: the node itself is this value.
    pub fn bare(value: Value) -> Self {
        Self::new(None, value)
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        !self.kind.is_container()
    }
}

/// What a save on this node writes back.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeShape {
    /// The node is a bare scalar; the coerced value replaces it.
    Scalar(Value),
    /// The node is a container; these primitive rows are merged into it.
    Fields(Vec<Row>),
}

impl NodeShape {
    /// Rows a user can type into, in display order.
    pub fn editable_rows(&self) -> Vec<Row> {
        match self {
            NodeShape::Scalar(value) => vec![Row::bare(value.clone())],
            NodeShape::Fields(rows) => rows.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub path: Path,
    pub rows: Vec<Row>,
}

impl Node {
    pub fn new(path: Path, rows: Vec<Row>) -> Self {
        Self { path, rows }
    }

    /// Build the rows the graph view would show for `value` at `path`.
    /// Object entries are keyed by name, array elements by their index, and
    /// a scalar becomes one bare row.
    pub fn from_value(path: Path, value: &Value) -> Self {
        let rows = match value {
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| Row::keyed(k.clone(), v.clone()))
                .collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| Row::keyed(i.to_string(), v.clone()))
                .collect(),
            scalar => vec![Row::bare(scalar.clone())],
        };
        Self { path, rows }
    }

    pub fn primitive_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.is_primitive())
    }

    pub fn shape(&self) -> NodeShape {
        let primitives: Vec<Row> = self.primitive_rows().cloned().collect();
        match primitives.as_slice() {
            [only] if only.key.is_none() => NodeShape::Scalar(only.value.clone()),
            _ => NodeShape::Fields(primitives),
        }
    }

    /// Read-only content shown for the node: `{}` when it has no rows, the
    /// bare value's text for a scalar node, otherwise a pretty object of its
    /// keyed primitive fields.
    pub fn display_text(&self) -> String {
        match self.rows.as_slice() {
            [] => "{}".to_string(),
            [only] if only.key.is_none() => format_value_for_input(&only.value),
            rows => {
                let fields: Map<String, Value> = rows
                    .iter()
                    .filter(|row| row.is_primitive())
                    .filter_map(|row| Some((row.key.clone()?, row.value.clone())))
                    .collect();
                serde_json::to_string_pretty(&Value::Object(fields)).unwrap_or_default()
            }
        }
    }
}
