//! Common test utilities for building workflow documents.
use flowmend::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Builds a node object placed at the origin.
#[allow(dead_code)]
pub fn node(id: &str, name: &str, node_type: &str) -> Value {
    json!({
        "parameters": {},
        "id": id,
        "name": name,
        "type": node_type,
        "typeVersion": 1,
        "position": [0, 0]
    })
}

/// Builds a node object at an explicit position.
#[allow(dead_code)]
pub fn node_at(id: &str, name: &str, node_type: &str, x: i64, y: i64) -> Value {
    let mut value = node(id, name, node_type);
    value["position"] = json!([x, y]);
    value
}

/// Wraps nodes and a raw connections value into a document.
#[allow(dead_code)]
pub fn document(nodes: Vec<Value>, connections: Value) -> WorkflowDocument {
    WorkflowDocument::from_value(json!({
        "name": "Test workflow",
        "nodes": nodes,
        "connections": connections,
        "active": false,
        "settings": {"executionOrder": "v1"}
    }))
    .expect("test document is an object")
}

/// A three step pipeline, trigger -> http -> set, wired by id.
///
/// Logic: `Webhook` (id 1) -> `Fetch` (id 2) -> `Store` (id 3)
#[allow(dead_code)]
pub fn create_linear_workflow() -> WorkflowDocument {
    document(
        vec![
            node("1", "Webhook", "n8n-nodes-base.webhookTrigger"),
            node("2", "Fetch", "n8n-nodes-base.httpRequest"),
            node("3", "Store", "n8n-nodes-base.set"),
        ],
        json!({
            "1": {"main": [[{"node": "2", "type": "main", "index": 0}]]},
            "2": {"main": [[{"node": "3", "type": "main", "index": 0}]]}
        }),
    )
}

/// Returns the `position` of the node with the given name.
#[allow(dead_code)]
pub fn position_of(document: &WorkflowDocument, name: &str) -> Option<(f64, f64)> {
    document
        .nodes()
        .into_iter()
        .find(|node| node.name.as_deref() == Some(name))
        .and_then(|node| node.position)
}

/// Writes a JSON value to `root/relative`, creating parent directories.
#[allow(dead_code)]
pub fn write_workflow(root: &Path, relative: &str, value: &Value) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create workflow directory");
    }
    fs::write(&path, serde_json::to_string_pretty(value).expect("serializable"))
        .expect("Failed to write workflow file");
}
