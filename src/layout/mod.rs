//! Layered left-to-right auto-layout.
//!
//! Each node is assigned a column (its layer) by breadth-first distance from the
//! seed nodes, and a row by name order within that column. Columns and rows map to
//! pixel coordinates on a fixed grid, so no two nodes ever share a position.

mod layering;

pub use layering::{assign_layers, select_seeds};

use crate::config::LayoutConfig;
use crate::graph::WorkflowGraph;
use crate::pass::{DocumentPass, Metrics, PassOutcome};
use crate::workflow::{NodeRecord, WorkflowDocument};
use ahash::AHashMap;
use itertools::Itertools;

/// The computed grid cell and pixel position for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index of the node inside the document's `nodes` array.
    pub index: usize,
    pub layer: usize,
    pub row: usize,
    pub x: i64,
    pub y: i64,
}

/// Computes and applies the layered layout.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Places every node. Nodes without an id, or unreachable from any seed, land in
    /// layer 0. Within a layer, rows follow ascending name with missing names first and
    /// document order breaking ties.
    pub fn plan(&self, nodes: &[NodeRecord], graph: &WorkflowGraph) -> Vec<Placement> {
        let seeds = select_seeds(nodes, graph, &self.config.trigger_keywords);
        let layers = assign_layers(&seeds, graph);

        let by_layer = nodes
            .iter()
            .map(|node| {
                let layer = node
                    .id
                    .as_deref()
                    .and_then(|id| layers.get(id).copied())
                    .unwrap_or(0);
                (layer, node)
            })
            .into_group_map();

        by_layer
            .into_iter()
            .sorted_by_key(|(layer, _)| *layer)
            .flat_map(|(layer, members)| {
                members
                    .into_iter()
                    .sorted_by(|a, b| a.sort_name().cmp(b.sort_name()))
                    .enumerate()
                    .map(move |(row, node)| (layer, row, node.index))
            })
            .map(|(layer, row, index)| Placement {
                index,
                layer,
                row,
                x: self.config.margin_x + layer as i64 * self.config.spacing_x,
                y: self.config.margin_y + row as i64 * self.config.spacing_y,
            })
            .collect()
    }

    /// Rewrites node positions that differ from the plan. Returns the number of nodes
    /// moved; documents with fewer than two nodes are left alone.
    pub fn layout_document(&self, document: &mut WorkflowDocument) -> usize {
        let Some((nodes, graph)) = WorkflowGraph::for_document(document) else {
            return 0;
        };
        let placements = self.plan(&nodes, &graph);

        let current: AHashMap<usize, Option<(f64, f64)>> =
            nodes.iter().map(|node| (node.index, node.position)).collect();

        let mut moved = 0;
        for placement in placements {
            let target = Some((placement.x as f64, placement.y as f64));
            if current.get(&placement.index).copied().flatten() != target {
                document.set_position(placement.index, placement.x, placement.y);
                moved += 1;
            }
        }
        if moved > 0 {
            log::debug!(
                "repositioned {} of {} node(s) across {} edge(s)",
                moved,
                nodes.len(),
                graph.edge_count()
            );
        }
        moved
    }
}

impl DocumentPass for LayoutEngine {
    fn name(&self) -> &str {
        "auto-layout"
    }

    fn apply(&self, document: &mut WorkflowDocument) -> PassOutcome {
        let moved = self.layout_document(document);
        let mut metrics = Metrics::new();
        metrics.add("nodes_repositioned", moved);
        PassOutcome {
            changed: moved > 0,
            metrics,
        }
    }
}
