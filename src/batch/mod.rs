//! Batch processing of workflow files on disk: discovery, dry-run/apply, backups.

mod discovery;
mod runner;
mod storage;
mod summary;

pub use discovery::discover_workflows;
pub use runner::{BatchRunner, RunMode};
pub use storage::{backup_file, timestamped_backup_dir, write_atomic};
pub use summary::{BatchSummary, FileOutcome};
