use ahash::AHashMap;
use serde_json::{Map, Value, json};

/// One wire in canonical form: `{"node": <target name>, "type": <port>, "index": <slot>}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Wire {
    pub node: String,
    pub port: String,
    pub index: i64,
}

impl Wire {
    pub fn new(node: impl Into<String>, port: impl Into<String>, index: i64) -> Self {
        Self {
            node: node.into(),
            port: port.into(),
            index,
        }
    }

    fn to_value(&self) -> Value {
        json!({ "node": self.node, "type": self.port, "index": self.index })
    }
}

/// All slot groups under one output port of a source node.
#[derive(Debug, Clone, PartialEq)]
pub struct PortEntry {
    pub port: String,
    pub groups: Vec<Vec<Wire>>,
}

/// All ports of one source node, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntry {
    pub name: String,
    pub ports: Vec<PortEntry>,
}

/// The canonical, name-keyed connection map.
///
/// Sources and ports keep the order in which they were first populated. Only non-empty
/// groups can be pushed, so empty ports and empty sources never appear.
#[derive(Debug, Clone, Default)]
pub struct CanonicalConnections {
    sources: Vec<SourceEntry>,
    positions: AHashMap<String, usize>,
}

impl CanonicalConnections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slot group under `source -> port`. Empty groups are ignored.
    pub fn push_group(&mut self, source: &str, port: &str, group: Vec<Wire>) {
        if group.is_empty() {
            return;
        }
        let source_idx = *self
            .positions
            .entry(source.to_string())
            .or_insert_with(|| {
                self.sources.push(SourceEntry {
                    name: source.to_string(),
                    ports: Vec::new(),
                });
                self.sources.len() - 1
            });
        let ports = &mut self.sources[source_idx].ports;
        match ports.iter_mut().find(|entry| entry.port == port) {
            Some(entry) => entry.groups.push(group),
            None => ports.push(PortEntry {
                port: port.to_string(),
                groups: vec![group],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[SourceEntry] {
        &self.sources
    }

    /// Iterates `(source name, wire)` pairs in canonical order.
    pub fn wires(&self) -> impl Iterator<Item = (&str, &Wire)> {
        self.sources.iter().flat_map(|source| {
            source
                .ports
                .iter()
                .flat_map(|port| port.groups.iter().flatten())
                .map(move |wire| (source.name.as_str(), wire))
        })
    }

    pub fn wire_count(&self) -> usize {
        self.wires().count()
    }

    /// Renders the exact nesting downstream consumers expect:
    /// `{source: {port: [[wire, ...], ...]}}`.
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        for source in &self.sources {
            let mut ports = Map::new();
            for entry in &source.ports {
                let groups = entry
                    .groups
                    .iter()
                    .map(|group| Value::Array(group.iter().map(Wire::to_value).collect()))
                    .collect();
                ports.insert(entry.port.clone(), Value::Array(groups));
            }
            root.insert(source.name.clone(), Value::Object(ports));
        }
        Value::Object(root)
    }
}

impl PartialEq for CanonicalConnections {
    fn eq(&self, other: &Self) -> bool {
        self.sources == other.sources
    }
}
