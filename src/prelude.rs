//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowmend crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowmend::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = load_config(None)?;
//! let runner = BatchRunner::new("workflows", "backups/layout").with_mode(RunMode::DryRun);
//! let summary = runner.run(&LayoutEngine::new(config.layout))?;
//! print!("{}", summary);
//! # Ok(())
//! # }
//! ```

// Passes
pub use crate::cleanup::DocumentCleaner;
pub use crate::layout::{LayoutEngine, Placement};
pub use crate::normalizer::{ConnectionNormalizer, NormalizeStats};
pub use crate::pass::{DocumentPass, Metrics, PassOutcome, Pipeline};

// Document model and graph
pub use crate::graph::{EndpointResolver, WorkflowGraph};
pub use crate::workflow::{CanonicalConnections, NodeRecord, Wire, WorkflowDocument};

// Batch processing and configuration
pub use crate::batch::{BatchRunner, BatchSummary, RunMode};
pub use crate::config::{FlowmendConfig, LayoutConfig, RepairConfig, load_config};

// Error types
pub use crate::error::{BatchError, ConfigError, DocumentError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
