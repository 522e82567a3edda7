use crate::pass::Metrics;

/// Counters collected while normalizing one document's connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub source_keys_converted_id_to_name: usize,
    pub target_nodes_converted_id_to_name: usize,
    pub source_keys_invalid_removed: usize,
    pub output_blocks_invalid_removed: usize,
    pub target_nodes_invalid_removed: usize,
    pub connections_deduplicated: usize,
    pub inferred_chain_created: usize,
}

impl From<NormalizeStats> for Metrics {
    fn from(stats: NormalizeStats) -> Self {
        let mut metrics = Metrics::new();
        metrics.add(
            "source_keys_converted_id_to_name",
            stats.source_keys_converted_id_to_name,
        );
        metrics.add(
            "target_nodes_converted_id_to_name",
            stats.target_nodes_converted_id_to_name,
        );
        metrics.add("source_keys_invalid_removed", stats.source_keys_invalid_removed);
        metrics.add(
            "output_blocks_invalid_removed",
            stats.output_blocks_invalid_removed,
        );
        metrics.add("target_nodes_invalid_removed", stats.target_nodes_invalid_removed);
        metrics.add("connections_deduplicated", stats.connections_deduplicated);
        metrics.add("inferred_chain_created", stats.inferred_chain_created);
        metrics
    }
}
