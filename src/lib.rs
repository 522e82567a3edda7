//! # Flowmend - Workflow Connection Repair and Auto-Layout
//!
//! **Flowmend** keeps node-based workflow documents structurally sound. Workflow files
//! produced by different tools and versions disagree on how they reference nodes inside
//! `connections`: sometimes by stable id, sometimes by display name, with varying
//! amounts of list nesting. Flowmend rewrites them into one canonical form and lays the
//! nodes out left to right without overlap.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse a document into a [`WorkflowDocument`](workflow::WorkflowDocument).
//!     Unknown fields are carried through untouched.
//! 2.  **Normalize**: A [`ConnectionNormalizer`](normalizer::ConnectionNormalizer) resolves
//!     every endpoint to a node name, drops dangling wires and collapses duplicates.
//! 3.  **Lay out**: A [`LayoutEngine`](layout::LayoutEngine) assigns each node a column by
//!     breadth-first distance from trigger nodes and a row by name order.
//! 4.  **Batch**: A [`BatchRunner`](batch::BatchRunner) applies any
//!     [`DocumentPass`](pass::DocumentPass) to a directory of files, in dry-run or apply mode.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowmend::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut document = WorkflowDocument::from_json(
//!         r#"{
//!             "nodes": [
//!                 {"id": "5", "name": "Start", "type": "n8n-nodes-base.manualTrigger", "position": [0, 0]},
//!                 {"id": "7", "name": "End", "type": "n8n-nodes-base.set", "position": [0, 0]}
//!             ],
//!             "connections": {"5": {"main": {"node": "7", "type": "main", "index": 0}}}
//!         }"#,
//!     )?;
//!
//!     let pipeline = Pipeline::new()
//!         .with_pass(ConnectionNormalizer::builder().infer_chain(true).build())
//!         .with_pass(LayoutEngine::new(LayoutConfig::default()));
//!
//!     let outcome = pipeline.apply(&mut document);
//!     println!("changed: {}", outcome.changed);
//!     print!("{}", outcome.metrics);
//!     println!("{}", document.to_pretty_json()?);
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod normalizer;
pub mod pass;
pub mod prelude;
pub mod workflow;
