use crate::graph::WorkflowGraph;
use crate::workflow::NodeRecord;
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// Picks the BFS starting points, in priority order: trigger-typed nodes, then
/// addressable nodes without incoming edges, then every node with an id.
///
/// Seeds are returned in document order without duplicates.
pub fn select_seeds(nodes: &[NodeRecord], graph: &WorkflowGraph, trigger_keywords: &[String]) -> Vec<String> {
    let keywords: Vec<String> = trigger_keywords.iter().map(|k| k.to_lowercase()).collect();
    let triggers = unique_ids(nodes.iter().filter(|node| {
        let node_type = node.node_type.to_lowercase();
        keywords.iter().any(|keyword| node_type.contains(keyword.as_str()))
    }));
    if !triggers.is_empty() {
        return triggers;
    }

    let roots = unique_ids(nodes.iter().filter(|node| {
        node.id
            .as_deref()
            .is_some_and(|id| graph.contains(id) && graph.in_degree(id) == 0)
    }));
    if !roots.is_empty() {
        return roots;
    }

    unique_ids(nodes.iter())
}

/// Multi-source shortest-path-by-hops layering.
///
/// Every seed sits at layer 0. A node is re-enqueued only when its layer strictly
/// decreases, so relaxation terminates on cyclic graphs. Nodes never reached are absent
/// from the result.
pub fn assign_layers(seeds: &[String], graph: &WorkflowGraph) -> AHashMap<String, usize> {
    let mut layers: AHashMap<String, usize> = AHashMap::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    for seed in seeds {
        layers.insert(seed.clone(), 0);
        queue.push_back(seed.clone());
    }

    while let Some(node) = queue.pop_front() {
        let next_layer = layers.get(&node).copied().unwrap_or(0) + 1;
        for successor in graph.successors(&node) {
            let improves = layers
                .get(successor)
                .is_none_or(|&current| next_layer < current);
            if improves {
                layers.insert(successor.to_string(), next_layer);
                queue.push_back(successor.to_string());
            }
        }
    }
    layers
}

fn unique_ids<'a>(nodes: impl Iterator<Item = &'a NodeRecord>) -> Vec<String> {
    let mut seen = AHashSet::new();
    nodes
        .filter_map(|node| node.id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
