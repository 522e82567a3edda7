//! Graph construction over the ambiguous id/name endpoint references of a workflow.

mod builder;
mod resolver;

pub use builder::{MIN_GRAPH_NODES, WorkflowGraph};
pub use resolver::{Endpoint, EndpointResolver, ResolvedVia};
