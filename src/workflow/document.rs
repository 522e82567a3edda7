use super::node::NodeRecord;
use crate::error::DocumentError;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;

/// A workflow document held as its raw JSON object.
///
/// Passes only ever touch `nodes[].position`, `connections` and, for the hygiene pass,
/// membership of the `nodes` array. Every other field, including key order inside node
/// objects, is carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDocument {
    root: Map<String, Value>,
}

impl WorkflowDocument {
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(DocumentError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Loads a document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Typed views of every object entry in `nodes`. A missing or non-array `nodes`
    /// value yields no records.
    pub fn nodes(&self) -> Vec<NodeRecord> {
        self.node_values()
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                value
                    .as_object()
                    .map(|object| NodeRecord::from_object(index, object))
            })
            .collect()
    }

    /// The raw `connections` value, if the key is present.
    pub fn connections(&self) -> Option<&Value> {
        self.root.get("connections")
    }

    pub fn set_connections(&mut self, connections: Value) {
        self.root.insert("connections".to_string(), connections);
    }

    /// Writes `[x, y]` into the node at `index` of the `nodes` array. An existing
    /// `position` key keeps its place in the object.
    pub fn set_position(&mut self, index: usize, x: i64, y: i64) {
        if let Some(node) = self
            .root
            .get_mut("nodes")
            .and_then(Value::as_array_mut)
            .and_then(|nodes| nodes.get_mut(index))
            .and_then(Value::as_object_mut)
        {
            node.insert("position".to_string(), json!([x, y]));
        }
    }

    /// Keeps only the entries of `nodes` whose array index satisfies `keep`.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(usize) -> bool) {
        if let Some(nodes) = self.root.get_mut("nodes").and_then(Value::as_array_mut) {
            let mut index = 0;
            nodes.retain(|_| {
                let kept = keep(index);
                index += 1;
                kept
            });
        }
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Serializes with two-space indentation, non-ASCII characters written verbatim.
    pub fn to_pretty_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    fn node_values(&self) -> &[Value] {
        self.root
            .get("nodes")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_object_documents() {
        let err = WorkflowDocument::from_json("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(WorkflowDocument::from_json("{not json").is_err());
    }

    #[test]
    fn set_position_keeps_key_order() {
        let mut doc = WorkflowDocument::from_json(
            r#"{"nodes": [{"id": "1", "position": [0, 0], "name": "A"}], "meta": {"z": 1, "a": 2}}"#,
        )
        .unwrap();
        doc.set_position(0, 100, 100);
        let text = serde_json::to_string(&doc.as_value()).unwrap();
        assert_eq!(
            text,
            r#"{"nodes":[{"id":"1","position":[100,100],"name":"A"}],"meta":{"z":1,"a":2}}"#
        );
    }

    #[test]
    fn non_array_nodes_yield_no_records() {
        let doc = WorkflowDocument::from_json(r#"{"nodes": {"id": "1"}}"#).unwrap();
        assert!(doc.nodes().is_empty());
    }

    #[test]
    fn retain_nodes_filters_by_index() {
        let mut doc =
            WorkflowDocument::from_json(r#"{"nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}]}"#)
                .unwrap();
        doc.retain_nodes(|index| index != 1);
        let ids: Vec<_> = doc.nodes().into_iter().filter_map(|n| n.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
