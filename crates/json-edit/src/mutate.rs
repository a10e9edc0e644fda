//! Path Mutator - immutable set-at-path over `serde_json::Value`.
//!
//! [`set_value_at_path`] never touches its input. Every container on the
//! path from the root to the target is rebuilt; everything off the path is
//! carried over unchanged.
//!
//! Index policy, shared with [`get_value_at_path`]:
//! - a segment addressing an array is read as a non-negative integer; a
//!   segment that is not one falls back to slot `0`;
//! - writing past the end pads the gap with `null`, by at most
//!   [`MAX_ARRAY_GAP`] slots; an index further out is treated like a
//!   non-numeric segment;
//! - `null` (or a missing slot) is treated as an empty object;
//! - any other scalar in the way is replaced by an empty array for an index
//!   segment and an empty object for a key segment.

use json_edit_path::PathSegment;
use serde_json::{Map, Value};

/// Most `null` slots a single write may pad an array with.
pub const MAX_ARRAY_GAP: usize = 1024;

/// Return a copy of `document` where the node at `path` is `value`.
pub fn set_value_at_path(document: &Value, path: &[PathSegment], value: Value) -> Value {
    let Some((head, rest)) = path.split_first() else {
        return value;
    };

    match document {
        Value::Array(items) => {
            let mut copy = items.clone();
            let idx = array_index(head, copy.len());
            write_slot(&mut copy, idx, rest, value);
            Value::Array(copy)
        }
        Value::Object(map) => Value::Object(write_key(map.clone(), head, rest, value)),
        Value::Null => Value::Object(write_key(Map::new(), head, rest, value)),
        _ if head.is_index() => {
            let mut copy = Vec::new();
            let idx = array_index(head, 0);
            write_slot(&mut copy, idx, rest, value);
            Value::Array(copy)
        }
        _ => Value::Object(write_key(Map::new(), head, rest, value)),
    }
}

/// Walk `path` from `document`, using the same index policy as
/// [`set_value_at_path`]. Returns `None` when a step does not exist.
pub fn get_value_at_path<'a>(document: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    path.iter().try_fold(document, |node, segment| match node {
        Value::Array(items) => items.get(array_index(segment, items.len())),
        Value::Object(map) => map.get(&segment.to_key()),
        _ => None,
    })
}

/// The direct child of `container` under `segment`, without any fallback:
/// a segment that does not name a slot of an array finds nothing.
pub(crate) fn child<'a>(container: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match container {
        Value::Array(items) => slot_index(segment, items.len()).and_then(|i| items.get(i)),
        Value::Object(map) => map.get(&segment.to_key()),
        _ => None,
    }
}

/// The slot `segment` names in an array of `len` elements: a non-negative
/// integer no more than [`MAX_ARRAY_GAP`] past the end.
pub(crate) fn slot_index(segment: &PathSegment, len: usize) -> Option<usize> {
    segment
        .as_index()
        .filter(|&idx| idx <= len || idx - len <= MAX_ARRAY_GAP)
}

/// Write `value` as a direct child of an owned `container`, with the same
/// policy as a one-segment [`set_value_at_path`].
pub(crate) fn put_child(container: &mut Value, segment: &PathSegment, value: Value) {
    match container {
        Value::Array(items) => {
            let idx = array_index(segment, items.len());
            write_slot(items, idx, &[], value);
        }
        Value::Object(map) => {
            map.insert(segment.to_key(), value);
        }
        other => *other = set_value_at_path(other, std::slice::from_ref(segment), value),
    }
}

fn array_index(segment: &PathSegment, len: usize) -> usize {
    slot_index(segment, len).unwrap_or(0)
}

fn write_slot(items: &mut Vec<Value>, idx: usize, rest: &[PathSegment], value: Value) {
    if idx >= items.len() {
        items.resize(idx + 1, Value::Null);
    }
    let next = if rest.is_empty() {
        value
    } else {
        set_value_at_path(&items[idx], rest, value)
    };
    items[idx] = next;
}

fn write_key(
    mut map: Map<String, Value>,
    head: &PathSegment,
    rest: &[PathSegment],
    value: Value,
) -> Map<String, Value> {
    let key = head.to_key();
    let next = if rest.is_empty() {
        value
    } else {
        set_value_at_path(map.get(&key).unwrap_or(&Value::Null), rest, value)
    };
    map.insert(key, next);
    map
}
