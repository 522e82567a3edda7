use serde_json::{Map, Value};

/// The shapes a raw per-port connection value is accepted in, in precedence order.
///
/// Workflow files written by different tools disagree on how much nesting a port
/// carries. Every accepted shape is lifted to the canonical `[[edge, ...], ...]`
/// form by [`PortShape::into_groups`].
#[derive(Debug, Clone, Copy)]
pub enum PortShape<'a> {
    /// `[[{...}, ...], ...]`: the canonical list of slot groups.
    Nested(&'a [Value]),
    /// `[{...}, ...]`: a single group without the outer list.
    Flat(&'a [Value]),
    /// `{...}`: a lone edge object.
    Single(&'a Map<String, Value>),
    /// Anything else; discarded.
    Invalid,
}

impl<'a> PortShape<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Array(items) if items.iter().all(Value::is_array) => PortShape::Nested(items),
            Value::Array(items) if items.iter().all(Value::is_object) => PortShape::Flat(items),
            Value::Object(edge) => PortShape::Single(edge),
            _ => PortShape::Invalid,
        }
    }

    /// Lifts the shape into slot groups of edge objects. Non-object entries inside a
    /// group are dropped.
    pub fn into_groups(self) -> Vec<Vec<&'a Map<String, Value>>> {
        match self {
            PortShape::Nested(groups) => groups
                .iter()
                .filter_map(Value::as_array)
                .map(|inner| inner.iter().filter_map(Value::as_object).collect())
                .collect(),
            PortShape::Flat(edges) => vec![edges.iter().filter_map(Value::as_object).collect()],
            PortShape::Single(edge) => vec![vec![edge]],
            PortShape::Invalid => Vec::new(),
        }
    }
}

/// Shorthand for `PortShape::classify(value).into_groups()`.
pub fn edge_groups(value: &Value) -> Vec<Vec<&Map<String, Value>>> {
    PortShape::classify(value).into_groups()
}
