//! Layered auto-layout tests
mod common;
use common::*;
use flowmend::layout::{assign_layers, select_seeds};
use flowmend::prelude::*;
use serde_json::json;
use std::collections::HashSet;

fn engine() -> LayoutEngine {
    LayoutEngine::new(LayoutConfig::default())
}

#[cfg(test)]
mod layout_tests {
    use super::*;

    #[test]
    fn test_linear_chain_is_laid_out_left_to_right() {
        let mut doc = create_linear_workflow();

        let moved = engine().layout_document(&mut doc);

        assert_eq!(moved, 3);
        assert_eq!(position_of(&doc, "Webhook"), Some((100.0, 100.0)));
        assert_eq!(position_of(&doc, "Fetch"), Some((380.0, 100.0)));
        assert_eq!(position_of(&doc, "Store"), Some((660.0, 100.0)));
    }

    #[test]
    fn test_positions_are_written_as_integers() {
        let mut doc = create_linear_workflow();
        engine().layout_document(&mut doc);
        let value = doc.into_value();
        assert_eq!(value["nodes"][1]["position"], json!([380, 100]));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut doc = create_linear_workflow();
        let first = engine().apply(&mut doc);
        let snapshot = doc.clone();
        let second = engine().apply(&mut doc);

        assert!(first.changed);
        assert_eq!(first.metrics.get("nodes_repositioned"), 3);
        assert!(!second.changed);
        assert!(second.metrics.is_empty());
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn test_layers_follow_edges_and_rows_follow_names() {
        // Trigger fans out to Zeta and Alpha; both feed Merge.
        let doc = document(
            vec![
                node("t", "Trigger", "n8n-nodes-base.scheduleTrigger"),
                node("z", "Zeta", "n8n-nodes-base.set"),
                node("a", "Alpha", "n8n-nodes-base.set"),
                node("m", "Merge", "n8n-nodes-base.merge"),
            ],
            json!({
                "Trigger": {"main": [[
                    {"node": "Zeta", "type": "main", "index": 0},
                    {"node": "Alpha", "type": "main", "index": 0}
                ]]},
                "Zeta": {"main": [[{"node": "Merge", "type": "main", "index": 0}]]},
                "Alpha": {"main": [[{"node": "Merge", "type": "main", "index": 1}]]}
            }),
        );
        let (nodes, graph) = WorkflowGraph::for_document(&doc).unwrap();
        let placements = engine().plan(&nodes, &graph);

        let by_index = |index: usize| placements.iter().find(|p| p.index == index).unwrap();
        assert_eq!((by_index(0).layer, by_index(0).row), (0, 0));
        assert_eq!((by_index(2).layer, by_index(2).row), (1, 0));
        assert_eq!((by_index(1).layer, by_index(1).row), (1, 1));
        assert_eq!((by_index(3).layer, by_index(3).row), (2, 0));
        assert_eq!((by_index(1).x, by_index(1).y), (380, 280));
    }

    #[test]
    fn test_every_edge_points_forward_in_acyclic_graphs() {
        let doc = document(
            vec![
                node("1", "Start", "manualTrigger"),
                node("2", "B", "set"),
                node("3", "C", "set"),
                node("4", "D", "set"),
                node("5", "E", "set"),
            ],
            json!({
                "Start": {"main": [[{"node": "B", "type": "main", "index": 0}, {"node": "E", "type": "main", "index": 0}]]},
                "B": {"main": [[{"node": "C", "type": "main", "index": 0}]]},
                "C": {"main": [[{"node": "D", "type": "main", "index": 0}]]},
                "E": {"main": [[{"node": "D", "type": "main", "index": 0}]]}
            }),
        );
        let (nodes, graph) = WorkflowGraph::for_document(&doc).unwrap();
        let seeds = select_seeds(&nodes, &graph, &LayoutConfig::default().trigger_keywords);
        let layers = assign_layers(&seeds, &graph);

        for (from, to) in graph.edges() {
            assert!(layers[to] <= layers[from] + 1, "{} -> {}", from, to);
        }
        // D is reached through E in two hops, not through B and C in three.
        assert_eq!(layers["4"], 2);
    }

    #[test]
    fn test_no_two_nodes_share_a_position() {
        let doc = document(
            vec![
                node("1", "Trigger", "webhook"),
                node("2", "A", "set"),
                node("3", "B", "set"),
                json!({"name": "Orphan without id", "type": "set", "position": [0, 0]}),
                node("5", "Island", "set"),
                node("6", "", "set"),
            ],
            json!({"Trigger": {"main": [[{"node": "A", "type": "main", "index": 0}, {"node": "B", "type": "main", "index": 0}]]}}),
        );
        let (nodes, graph) = WorkflowGraph::for_document(&doc).unwrap();
        let placements = engine().plan(&nodes, &graph);

        assert_eq!(placements.len(), nodes.len());
        let positions: HashSet<(i64, i64)> = placements.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(positions.len(), placements.len());
    }

    #[test]
    fn test_unnamed_nodes_take_the_first_row() {
        let doc = document(
            vec![
                node("1", "Trigger", "manualTrigger"),
                json!({"id": "2", "type": "set"}),
            ],
            json!({}),
        );
        let (nodes, graph) = WorkflowGraph::for_document(&doc).unwrap();
        let placements = engine().plan(&nodes, &graph);

        let unnamed = placements.iter().find(|p| p.index == 1).unwrap();
        assert_eq!((unnamed.layer, unnamed.row), (0, 0));
        let trigger = placements.iter().find(|p| p.index == 0).unwrap();
        assert_eq!((trigger.layer, trigger.row), (0, 1));
    }

    #[test]
    fn test_cycles_without_triggers_terminate() {
        let mut doc = document(
            vec![node("1", "A", "set"), node("2", "B", "set")],
            json!({
                "A": {"main": [[{"node": "B", "type": "main", "index": 0}]]},
                "B": {"main": [[{"node": "A", "type": "main", "index": 0}]]}
            }),
        );
        assert_eq!(engine().layout_document(&mut doc), 2);
        assert_eq!(position_of(&doc, "A"), Some((100.0, 100.0)));
        assert_eq!(position_of(&doc, "B"), Some((100.0, 280.0)));
    }

    #[test]
    fn test_single_node_documents_are_untouched() {
        let mut doc = document(vec![node("1", "Solo", "manualTrigger")], json!({}));
        let snapshot = doc.clone();
        let outcome = engine().apply(&mut doc);
        assert!(!outcome.changed);
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn test_custom_spacing_and_margins() {
        let config = LayoutConfig {
            spacing_x: 200,
            spacing_y: 100,
            margin_x: 0,
            margin_y: 50,
            ..LayoutConfig::default()
        };
        let mut doc = create_linear_workflow();
        LayoutEngine::new(config).layout_document(&mut doc);
        assert_eq!(position_of(&doc, "Webhook"), Some((0.0, 50.0)));
        assert_eq!(position_of(&doc, "Store"), Some((400.0, 50.0)));
    }

    #[test]
    fn test_non_object_entries_keep_array_indices() {
        let mut doc = document(
            vec![
                node("1", "Webhook", "n8n-nodes-base.webhookTrigger"),
                json!("not a node"),
                node("2", "Fetch", "n8n-nodes-base.httpRequest"),
            ],
            json!({"Webhook": {"main": [[{"node": "Fetch", "type": "main", "index": 0}]]}}),
        );

        assert_eq!(engine().layout_document(&mut doc), 2);
        let value = doc.as_value();
        assert_eq!(value["nodes"][1], json!("not a node"));
        assert_eq!(value["nodes"][2]["position"], json!([380, 100]));
        assert_eq!(engine().layout_document(&mut doc), 0);
    }

    #[test]
    fn test_only_positions_change() {
        let mut doc = create_linear_workflow();
        let before = doc.as_value();
        engine().layout_document(&mut doc);
        let mut after = doc.into_value();

        for (index, node) in before["nodes"].as_array().unwrap().iter().enumerate() {
            after["nodes"][index]["position"] = node["position"].clone();
        }
        assert_eq!(after, before);
    }
}
