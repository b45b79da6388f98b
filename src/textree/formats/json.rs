//! JSON formatter
//!
//! Renders the tree as nested JSON objects. Each node becomes
//! `{"tag": ..., "content": ..., "attributes": {...}, "children": [...]}`;
//! `content` is omitted for nodes without text.

use crate::textree::formats::registry::{FormatError, Formatter};
use crate::textree::tree::{NodeId, Tree};
use serde_json::{json, Map, Value};

/// Formatter producing nested JSON.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        let value = node_to_value(tree, tree.root());
        serde_json::to_string_pretty(&value)
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "nested JSON objects"
    }
}

fn node_to_value(tree: &Tree, id: NodeId) -> Value {
    let node = tree.node(id);
    let mut object = Map::new();
    object.insert("tag".to_string(), json!(node.tag()));
    if let Some(content) = node.content() {
        object.insert("content".to_string(), json!(content));
    }
    let attributes: Map<String, Value> = node
        .attributes()
        .iter()
        .map(|(name, value)| (name.clone(), json!(value)))
        .collect();
    object.insert("attributes".to_string(), Value::Object(attributes));
    let children: Vec<Value> = node
        .children()
        .iter()
        .map(|&child| node_to_value(tree, child))
        .collect();
    object.insert("children".to_string(), Value::Array(children));
    Value::Object(object)
}
