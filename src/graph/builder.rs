use super::resolver::EndpointResolver;
use crate::workflow::{NodeRecord, WorkflowDocument, edge_groups};
use ahash::{AHashMap, AHashSet};
use serde_json::Value;

/// Fewer nodes than this leaves nothing to connect or lay out.
pub const MIN_GRAPH_NODES: usize = 2;

/// The directed graph of one workflow document, keyed by node id.
///
/// Parallel wires between the same two nodes collapse into a single edge, so
/// `in_degree` counts distinct predecessors.
#[derive(Debug, Clone, Default)]
pub struct WorkflowGraph {
    resolver: EndpointResolver,
    adjacency: AHashMap<String, AHashSet<String>>,
    in_degree: AHashMap<String, usize>,
}

impl WorkflowGraph {
    /// Builds the graph for a document, or `None` when it has fewer than
    /// [`MIN_GRAPH_NODES`] nodes.
    pub fn for_document(document: &WorkflowDocument) -> Option<(Vec<NodeRecord>, Self)> {
        let nodes = document.nodes();
        if nodes.len() < MIN_GRAPH_NODES {
            return None;
        }
        let graph = Self::build(&nodes, document.connections());
        Some((nodes, graph))
    }

    /// Builds the graph from node records and a raw `connections` value of any shape.
    /// Dangling references and malformed fragments are skipped.
    pub fn build(nodes: &[NodeRecord], connections: Option<&Value>) -> Self {
        let resolver = EndpointResolver::from_nodes(nodes);
        let mut adjacency: AHashMap<String, AHashSet<String>> = resolver
            .ids()
            .map(|id| (id.to_string(), AHashSet::new()))
            .collect();
        let mut in_degree: AHashMap<String, usize> =
            resolver.ids().map(|id| (id.to_string(), 0)).collect();

        let sources = connections.and_then(Value::as_object);
        for (raw_source, by_port) in sources.into_iter().flatten() {
            let Some(source) = resolver.resolve(raw_source) else {
                continue;
            };
            let Some(by_port) = by_port.as_object() else {
                continue;
            };
            for raw_wires in by_port.values() {
                for edge in edge_groups(raw_wires).into_iter().flatten() {
                    let Some(target) = edge.get("node").and_then(|raw| resolver.resolve_value(raw))
                    else {
                        continue;
                    };
                    let successors = adjacency.entry(source.id.to_string()).or_default();
                    if successors.insert(target.id.to_string()) {
                        *in_degree.entry(target.id.to_string()).or_default() += 1;
                    }
                }
            }
        }

        Self {
            resolver,
            adjacency,
            in_degree,
        }
    }

    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// One-hop successors of `id`.
    pub fn successors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.adjacency
            .get(id)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|successors| successors.contains(to))
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.in_degree.get(id).copied().unwrap_or(0)
    }

    /// Ids of every node that can be an edge endpoint.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.resolver.ids()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resolver.contains_id(id)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|successors| successors.len()).sum()
    }

    /// Every `(from, to)` edge; order is unspecified.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency.iter().flat_map(|(from, successors)| {
            successors
                .iter()
                .map(move |to| (from.as_str(), to.as_str()))
        })
    }
}
