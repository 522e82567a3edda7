//! Rewrites a document's `connections` into the canonical name-keyed form.

mod stats;

pub use stats::NormalizeStats;

use crate::config::RepairConfig;
use crate::graph::EndpointResolver;
use crate::pass::{DocumentPass, PassOutcome};
use crate::workflow::{CanonicalConnections, NodeRecord, Wire, WorkflowDocument, edge_groups};
use ahash::AHashSet;
use itertools::Itertools;
use serde_json::{Map, Value};

/// The result of normalizing one connection map.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub connections: CanonicalConnections,
    pub stats: NormalizeStats,
}

/// Canonicalizes connection maps: endpoints keyed by node name, dangling and
/// malformed wires dropped, duplicates collapsed, `type` forced to the enclosing port.
#[derive(Debug, Clone)]
pub struct ConnectionNormalizer {
    infer_chain: bool,
    chain_port: String,
}

pub struct ConnectionNormalizerBuilder {
    infer_chain: bool,
    chain_port: String,
}

impl ConnectionNormalizerBuilder {
    pub fn new() -> Self {
        let defaults = RepairConfig::default();
        Self {
            infer_chain: defaults.infer_chain,
            chain_port: defaults.chain_port,
        }
    }

    /// Synthesize a chain ordered by x position when nothing survives normalization.
    pub fn infer_chain(mut self, enabled: bool) -> Self {
        self.infer_chain = enabled;
        self
    }

    pub fn chain_port(mut self, port: &str) -> Self {
        self.chain_port = port.to_string();
        self
    }

    pub fn build(self) -> ConnectionNormalizer {
        ConnectionNormalizer {
            infer_chain: self.infer_chain,
            chain_port: self.chain_port,
        }
    }
}

impl Default for ConnectionNormalizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ConnectionNormalizer {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ConnectionNormalizer {
    pub fn builder() -> ConnectionNormalizerBuilder {
        ConnectionNormalizerBuilder::new()
    }

    pub fn from_config(config: &RepairConfig) -> Self {
        Self::builder()
            .infer_chain(config.infer_chain)
            .chain_port(&config.chain_port)
            .build()
    }

    /// Normalizes a raw `connections` value against the document's nodes.
    pub fn normalize(&self, nodes: &[NodeRecord], connections: Option<&Value>) -> Normalized {
        let resolver = EndpointResolver::from_nodes(nodes);
        let mut stats = NormalizeStats::default();
        let mut canonical = CanonicalConnections::new();
        let mut seen: AHashSet<(String, String, String, i64)> = AHashSet::new();

        let sources = connections.and_then(Value::as_object);
        for (raw_source, by_port) in sources.into_iter().flatten() {
            let Some(source) = resolver.resolve(raw_source) else {
                stats.source_keys_invalid_removed += 1;
                continue;
            };
            if source.was_id() {
                stats.source_keys_converted_id_to_name += 1;
            }
            let Some(by_port) = by_port.as_object() else {
                stats.output_blocks_invalid_removed += 1;
                continue;
            };

            for (port, raw_wires) in by_port {
                for raw_group in edge_groups(raw_wires) {
                    let mut group = Vec::new();
                    for edge in raw_group {
                        let Some(wire) = self.canonical_wire(&resolver, port, edge, &mut stats)
                        else {
                            continue;
                        };
                        let key = (
                            source.name.to_string(),
                            port.clone(),
                            wire.node.clone(),
                            wire.index,
                        );
                        if !seen.insert(key) {
                            stats.connections_deduplicated += 1;
                            continue;
                        }
                        group.push(wire);
                    }
                    canonical.push_group(source.name, port, group);
                }
            }
        }

        if self.infer_chain && canonical.is_empty() && nodes.len() > 1 {
            stats.inferred_chain_created = self.push_inferred_chain(nodes, &mut canonical);
            log::debug!(
                "inferred a chain of {} connection(s) from node positions",
                stats.inferred_chain_created
            );
        }

        Normalized {
            connections: canonical,
            stats,
        }
    }

    /// Normalizes the document in place. The document is only rewritten when the
    /// canonical form differs structurally from what it already holds.
    pub fn normalize_document(&self, document: &mut WorkflowDocument) -> (bool, NormalizeStats) {
        let nodes = document.nodes();
        let normalized = self.normalize(&nodes, document.connections());
        let after = normalized.connections.to_value();
        let changed = match document.connections() {
            Some(before) => *before != after,
            None => after != Value::Object(Map::new()),
        };
        if changed {
            document.set_connections(after);
        }
        (changed, normalized.stats)
    }

    fn canonical_wire(
        &self,
        resolver: &EndpointResolver,
        port: &str,
        edge: &Map<String, Value>,
        stats: &mut NormalizeStats,
    ) -> Option<Wire> {
        let raw_target = edge.get("node").filter(|raw| !raw.is_null())?;
        let Some(target) = resolver.resolve_value(raw_target) else {
            stats.target_nodes_invalid_removed += 1;
            return None;
        };
        if target.was_id() {
            stats.target_nodes_converted_id_to_name += 1;
        }
        let index = edge.get("index").map(coerce_index).unwrap_or(0);
        Some(Wire::new(target.name, port, index))
    }

    /// Links addressable nodes left to right by `(x, name)` and returns the number of wires.
    fn push_inferred_chain(&self, nodes: &[NodeRecord], canonical: &mut CanonicalConnections) -> usize {
        let ordered: Vec<&NodeRecord> = nodes
            .iter()
            .filter(|node| node.is_addressable())
            .sorted_by(|a, b| {
                a.x()
                    .total_cmp(&b.x())
                    .then_with(|| a.sort_name().cmp(b.sort_name()))
            })
            .collect();

        let mut created = 0;
        for (from, to) in ordered.iter().tuple_windows() {
            canonical.push_group(
                from.sort_name(),
                &self.chain_port,
                vec![Wire::new(to.sort_name(), self.chain_port.as_str(), 0)],
            );
            created += 1;
        }
        created
    }
}

impl DocumentPass for ConnectionNormalizer {
    fn name(&self) -> &str {
        "repair-connections"
    }

    fn apply(&self, document: &mut WorkflowDocument) -> PassOutcome {
        let (changed, stats) = self.normalize_document(document);
        PassOutcome {
            changed,
            metrics: stats.into(),
        }
    }
}

/// Reads a slot index leniently: integers as-is, floats truncated, numeric strings
/// parsed, booleans as `0`/`1`, anything else `0`.
pub fn coerce_index(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}
