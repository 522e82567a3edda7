//! Document hygiene: drops duplicate documentation notes and empty placeholder nodes.

use crate::config::CleanupConfig;
use crate::pass::{DocumentPass, Metrics, PassOutcome};
use crate::workflow::{NodeRecord, WorkflowDocument};
use ahash::AHashSet;

/// Why a node was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    DuplicateDocumentation,
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentCleaner {
    config: CleanupConfig,
}

impl DocumentCleaner {
    pub fn new(config: CleanupConfig) -> Self {
        Self { config }
    }

    /// Decides which nodes to drop, as `(nodes array index, reason)` in document order.
    ///
    /// The first documentation note is kept; later ones are duplicates. A node is empty
    /// when its name is missing, blank or starts with the unnamed prefix, or when it has
    /// no type.
    pub fn plan(&self, nodes: &[NodeRecord]) -> Vec<(usize, Removal)> {
        let mut seen_documentation = false;
        let mut removals = Vec::new();
        for node in nodes {
            if self.is_empty_node(node) {
                removals.push((node.index, Removal::Empty));
            } else if self.is_documentation(node) {
                if seen_documentation {
                    removals.push((node.index, Removal::DuplicateDocumentation));
                }
                seen_documentation = true;
            }
        }
        removals
    }

    pub fn clean_document(&self, document: &mut WorkflowDocument) -> Metrics {
        let removals = self.plan(&document.nodes());
        let mut metrics = Metrics::new();
        if removals.is_empty() {
            return metrics;
        }

        let doomed: AHashSet<usize> = removals.iter().map(|(index, _)| *index).collect();
        document.retain_nodes(|index| !doomed.contains(&index));

        let duplicates = removals
            .iter()
            .filter(|(_, reason)| *reason == Removal::DuplicateDocumentation)
            .count();
        metrics.add("documentation_duplicates_removed", duplicates);
        metrics.add("empty_nodes_removed", removals.len() - duplicates);
        metrics
    }

    fn is_documentation(&self, node: &NodeRecord) -> bool {
        node.node_type == self.config.documentation_node_type
            && node
                .sort_name()
                .to_lowercase()
                .contains(&self.config.documentation_marker.to_lowercase())
    }

    fn is_empty_node(&self, node: &NodeRecord) -> bool {
        let name = node.sort_name().trim();
        name.is_empty()
            || node.node_type.is_empty()
            || (!self.config.unnamed_prefix.is_empty()
                && node.sort_name().starts_with(&self.config.unnamed_prefix))
    }
}

impl DocumentPass for DocumentCleaner {
    fn name(&self) -> &str {
        "cleanup"
    }

    fn apply(&self, document: &mut WorkflowDocument) -> PassOutcome {
        let metrics = self.clean_document(document);
        PassOutcome {
            changed: !metrics.is_empty(),
            metrics,
        }
    }
}
