//! End-to-end saves through `NodeEditor` and `DocumentStore`.

use json_edit::{
    DocumentStore, EditError, EditKey, GraphSink, Node, NodeEditor, Path, Row, StoreConfig,
};
use serde_json::{json, Value};

#[derive(Default)]
struct GraphLog(Vec<String>);

impl GraphSink for GraphLog {
    fn rebuild(&mut self, text: &str) {
        self.0.push(text.to_string());
    }
}

fn store(doc: Value) -> DocumentStore<GraphLog> {
    let mut store = DocumentStore::new(StoreConfig::default(), GraphLog::default());
    store.set_document_text(doc.to_string());
    store
}

fn node_at(store: &DocumentStore<GraphLog>, path: Path) -> Node {
    let doc = store.snapshot().unwrap();
    let value = json_edit::get_value_at_path(&doc, path.segments())
        .cloned()
        .unwrap_or(Value::Null);
    Node::from_value(path, &value)
}

fn saved(store: &DocumentStore<GraphLog>) -> Value {
    serde_json::from_str(store.document_text()).unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_number_field_on_root() {
    let mut store = store(json!({"a": 1, "b": "x"}));
    let mut editor = NodeEditor::open(node_at(&store, Path::root()));
    editor.begin_edit();
    editor.set_field(EditKey::from("a"), "5");
    editor.save(&mut store).unwrap();
    assert_eq!(saved(&store), json!({"a": 5, "b": "x"}));
}

#[test]
fn scenario_b_nested_boolean() {
    let mut store = store(json!({"a": {"b": true}}));
    let mut editor = NodeEditor::open(node_at(&store, Path::root().key("a")));
    editor.begin_edit();
    editor.set_field(EditKey::from("b"), "false");
    editor.save(&mut store).unwrap();
    assert_eq!(saved(&store), json!({"a": {"b": false}}));
}

#[test]
fn scenario_c_untouched_sibling_field() {
    let mut store = store(json!({"a": {"x": 1, "y": 2}}));
    let mut editor = NodeEditor::open(node_at(&store, Path::root().key("a")));
    editor.begin_edit();
    editor.set_field(EditKey::from("x"), "9");
    editor.save(&mut store).unwrap();
    assert_eq!(saved(&store), json!({"a": {"x": 9, "y": 2}}));
}

#[test]
fn scenario_d_rejected_number_leaves_document() {
    let mut store = store(json!({"a": 1}));
    let before = store.document_text().to_string();
    let mut editor = NodeEditor::open(node_at(&store, Path::root()));
    editor.begin_edit();
    editor.set_field(EditKey::from("a"), "abc");
    let err = editor.save(&mut store).unwrap_err();
    assert!(matches!(err, EditError::InvalidValue("must be a number")));
    assert_eq!(store.document_text(), before);
    assert_eq!(store.graph().0.len(), 1);
    assert!(!store.has_changes());
}

#[test]
fn scenario_e_bare_scalar_in_array() {
    let mut store = store(json!({"a": [1, 2, 3]}));
    let node = Node::new(Path::root().key("a").index(1), vec![Row::bare(json!(2))]);
    let mut editor = NodeEditor::open(node);
    assert_eq!(editor.buffer().get(&EditKey::Value), Some("2"));
    editor.begin_edit();
    editor.set_field(EditKey::Value, "7");
    editor.save(&mut store).unwrap();
    assert_eq!(saved(&store), json!({"a": [1, 7, 3]}));
}

// ---------------------------------------------------------------------------
// All-or-nothing
// ---------------------------------------------------------------------------

#[test]
fn one_bad_field_blocks_every_field() {
    let mut store = store(json!({"n": 1, "s": "a", "b": false}));
    let mut editor = NodeEditor::open(node_at(&store, Path::root()));
    editor.begin_edit();
    editor.set_field(EditKey::from("s"), "changed");
    editor.set_field(EditKey::from("b"), "nope");
    assert!(editor.save(&mut store).is_err());
    assert_eq!(saved(&store), json!({"n": 1, "s": "a", "b": false}));
    assert_eq!(editor.error(), Some("Value must be true or false"));

    editor.set_field(EditKey::from("b"), "TRUE");
    editor.save(&mut store).unwrap();
    assert_eq!(saved(&store), json!({"n": 1, "s": "changed", "b": true}));
    assert!(!editor.is_editing());
}

// ---------------------------------------------------------------------------
// Container fields
// ---------------------------------------------------------------------------

#[test]
fn array_node_fields_write_by_index() {
    let mut store = store(json!({"tags": ["a", "b", {"deep": 1}]}));
    let mut editor = NodeEditor::open(node_at(&store, Path::root().key("tags")));
    editor.begin_edit();
    editor.set_field(EditKey::from("1"), "B");
    editor.save(&mut store).unwrap();
    assert_eq!(saved(&store), json!({"tags": ["a", "B", {"deep": 1}]}));
}

#[test]
fn child_containers_survive_field_save() {
    let mut store = store(json!({"user": {"name": "Ann", "tags": ["x"], "meta": {"v": 1}}}));
    let mut editor = NodeEditor::open(node_at(&store, Path::root().key("user")));
    editor.begin_edit();
    editor.set_field(EditKey::from("name"), "Bob");
    editor.save(&mut store).unwrap();
    assert_eq!(
        saved(&store),
        json!({"user": {"name": "Bob", "tags": ["x"], "meta": {"v": 1}}})
    );
}

#[test]
fn null_field_accepts_text() {
    let mut store = store(json!({"note": null}));
    let mut editor = NodeEditor::open(node_at(&store, Path::root()));
    editor.begin_edit();
    editor.set_field(EditKey::from("note"), "hello");
    editor.save(&mut store).unwrap();
    assert_eq!(saved(&store), json!({"note": "hello"}));
}

#[test]
fn saved_text_is_pretty_printed() {
    let mut store = store(json!({"a": 1}));
    let mut editor = NodeEditor::open(node_at(&store, Path::root()));
    editor.begin_edit();
    editor.set_field(EditKey::from("a"), "2");
    let text = editor.save(&mut store).unwrap();
    assert_eq!(text, "{\n  \"a\": 2\n}");
    assert_eq!(store.graph().0.last().map(String::as_str), Some(text.as_str()));
    assert!(store.has_changes());
}

#[test]
fn non_index_row_on_array_node_leaves_elements_alone() {
    let mut store = store(json!({"a": ["keep", "b"]}));
    let node = Node::new(
        Path::root().key("a"),
        vec![Row::keyed("name", json!("keep")), Row::keyed("1", json!("b"))],
    );
    let mut editor = NodeEditor::open(node);
    editor.begin_edit();
    editor.set_field(EditKey::from("name"), "clobber");
    editor.set_field(EditKey::from("1"), "B");
    editor.save(&mut store).unwrap();
    assert_eq!(saved(&store), json!({"a": ["keep", "B"]}));
}

#[test]
fn huge_index_row_on_array_node_does_not_panic() {
    let mut store = store(json!({"a": [1, 2]}));
    let node = Node::new(
        Path::root().key("a"),
        vec![Row::keyed(usize::MAX.to_string(), json!(1))],
    );
    let mut editor = NodeEditor::open(node);
    editor.begin_edit();
    editor.set_field(EditKey::Field(usize::MAX.to_string()), "5");
    editor.save(&mut store).unwrap();
    assert_eq!(saved(&store), json!({"a": [1, 2]}));
}
