//! Graph construction and endpoint resolution tests
mod common;
use common::*;
use flowmend::graph::ResolvedVia;
use flowmend::prelude::*;
use serde_json::json;

#[cfg(test)]
mod graph_tests {
    use super::*;

    #[test]
    fn test_resolver_is_symmetric() {
        let doc = create_linear_workflow();
        let resolver = EndpointResolver::from_nodes(&doc.nodes());

        assert_eq!(resolver.len(), 3);
        for id in ["1", "2", "3"] {
            let name = resolver.name_of(id).expect("every id has a name");
            assert_eq!(resolver.id_of(name), Some(id));
        }
    }

    #[test]
    fn test_resolution_prefers_names_over_ids() {
        // Node "B" has an id that collides with node "1"'s name.
        let doc = document(
            vec![node("x", "1", "set"), node("1", "B", "set")],
            json!({}),
        );
        let resolver = EndpointResolver::from_nodes(&doc.nodes());

        let endpoint = resolver.resolve("1").unwrap();
        assert_eq!(endpoint.name, "1");
        assert_eq!(endpoint.via, ResolvedVia::Name);

        let endpoint = resolver.resolve("x").unwrap();
        assert_eq!(endpoint.name, "1");
        assert!(endpoint.was_id());

        assert!(resolver.resolve("missing").is_none());
        assert!(resolver.resolve_value(&json!(null)).is_none());
    }

    #[test]
    fn test_numeric_references_resolve() {
        let doc = document(
            vec![node("5", "Start", "manualTrigger"), node("7", "End", "set")],
            json!({}),
        );
        let resolver = EndpointResolver::from_nodes(&doc.nodes());
        assert_eq!(resolver.resolve_value(&json!(7)).unwrap().name, "End");
    }

    #[test]
    fn test_duplicate_names_last_declared_wins() {
        let doc = document(
            vec![node("a", "Same", "set"), node("b", "Same", "set")],
            json!({}),
        );
        let resolver = EndpointResolver::from_nodes(&doc.nodes());
        assert_eq!(resolver.id_of("Same"), Some("b"));
        assert_eq!(resolver.name_of("a"), Some("Same"));
    }

    #[test]
    fn test_nodes_without_id_or_name_are_not_addressable() {
        let doc = document(
            vec![
                node("1", "A", "set"),
                json!({"name": "NoId", "type": "set"}),
                json!({"id": "3", "type": "set"}),
            ],
            json!({}),
        );
        let resolver = EndpointResolver::from_nodes(&doc.nodes());
        assert_eq!(resolver.len(), 1);
        assert!(resolver.resolve("NoId").is_none());
        assert!(resolver.resolve("3").is_none());
    }

    #[test]
    fn test_parallel_wires_count_once_in_in_degree() {
        let doc = document(
            vec![
                node("1", "A", "manualTrigger"),
                node("2", "B", "set"),
                node("3", "C", "set"),
            ],
            json!({
                "A": {
                    "main": [[
                        {"node": "B", "type": "main", "index": 0},
                        {"node": "2", "type": "main", "index": 1}
                    ]],
                    "error": {"node": "B", "type": "error", "index": 0}
                },
                "3": {"main": [{"node": "B", "type": "main", "index": 0}]}
            }),
        );
        let (_, graph) = WorkflowGraph::for_document(&doc).expect("enough nodes");

        assert_eq!(graph.in_degree("2"), 2);
        assert_eq!(graph.in_degree("1"), 0);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("1", "2"));
        assert!(graph.has_edge("3", "2"));
        assert!(!graph.has_edge("2", "1"));
    }

    #[test]
    fn test_dangling_and_malformed_connections_are_skipped() {
        let doc = document(
            vec![node("1", "A", "manualTrigger"), node("2", "B", "set")],
            json!({
                "ghost": {"main": [[{"node": "B", "type": "main", "index": 0}]]},
                "A": {
                    "main": [[{"node": "nowhere", "type": "main", "index": 0}, "junk", 42]],
                    "other": "not a port value"
                },
                "B": "not an object"
            }),
        );
        let (_, graph) = WorkflowGraph::for_document(&doc).expect("enough nodes");
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.in_degree("2"), 0);
    }

    #[test]
    fn test_small_documents_have_no_graph() {
        let doc = document(vec![node("1", "Solo", "manualTrigger")], json!({}));
        assert!(WorkflowGraph::for_document(&doc).is_none());

        let empty = WorkflowDocument::from_json(r#"{"connections": {}}"#).unwrap();
        assert!(WorkflowGraph::for_document(&empty).is_none());
    }
}
