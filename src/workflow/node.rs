use serde_json::{Map, Value};

/// A typed, read-only view of one entry of a document's `nodes` array.
///
/// Only the fields the repair and layout passes care about are extracted. The
/// underlying JSON object is never modified through this view.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// Index of the node inside the document's `nodes` array.
    pub index: usize,
    pub id: Option<String>,
    pub name: Option<String>,
    pub node_type: String,
    /// The current `[x, y]` position, if it is a two-element numeric array.
    pub position: Option<(f64, f64)>,
}

impl NodeRecord {
    pub fn from_object(index: usize, object: &Map<String, Value>) -> Self {
        Self {
            index,
            id: object.get("id").and_then(scalar_key),
            name: object.get("name").and_then(scalar_key),
            node_type: object
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            position: object.get("position").and_then(parse_position),
        }
    }

    /// True when the node can take part in the graph as an edge endpoint.
    pub fn is_addressable(&self) -> bool {
        self.id.is_some() && self.name.is_some()
    }

    /// The name used for ordering; missing names sort first.
    pub fn sort_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Horizontal position used when inferring a chain; missing positions count as `0`.
    pub fn x(&self) -> f64 {
        self.position.map(|(x, _)| x).unwrap_or(0.0)
    }
}

/// Converts an identifier-like JSON value into a lookup key.
///
/// Strings are used verbatim and numbers are stringified. Empty strings and every
/// other JSON type yield `None`.
pub fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_position(value: &Value) -> Option<(f64, f64)> {
    match value.as_array()?.as_slice() {
        [x, y] => Some((x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}
