use super::discovery::discover_workflows;
use super::storage::{backup_file, write_atomic};
use super::summary::{BatchSummary, FileOutcome};
use crate::config::BatchConfig;
use crate::error::{BatchError, DocumentError};
use crate::pass::{DocumentPass, Metrics};
use crate::workflow::WorkflowDocument;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Whether computed changes are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Report only; nothing on disk is touched.
    #[default]
    DryRun,
    /// Back up and rewrite every changed file.
    Apply,
}

/// Runs a [`DocumentPass`] over every workflow file below a root directory.
pub struct BatchRunner {
    root: PathBuf,
    backup_dir: PathBuf,
    mode: RunMode,
    limit: Option<usize>,
    parallel: bool,
}

impl BatchRunner {
    pub fn new(root: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        let defaults = BatchConfig::default();
        Self {
            root: root.into(),
            backup_dir: backup_dir.into(),
            mode: RunMode::default(),
            limit: defaults.limit,
            parallel: defaults.parallel,
        }
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Processes every discovered file. Per-file failures are recorded in the summary;
    /// only a missing or unreadable root aborts the run.
    pub fn run(&self, pass: &dyn DocumentPass) -> Result<BatchSummary, BatchError> {
        let files = discover_workflows(&self.root, self.limit)?;

        let outcomes: Vec<FileOutcome> = if self.parallel {
            files
                .par_iter()
                .map(|path| self.process_file(path, pass))
                .collect()
        } else {
            files
                .iter()
                .map(|path| self.process_file(path, pass))
                .collect()
        };

        let mut summary = BatchSummary::default();
        for (path, outcome) in files.into_iter().zip(outcomes) {
            summary.record(path, outcome);
        }
        log::info!(
            "'{}' finished: {} modified, {} unchanged, {} failed",
            pass.name(),
            summary.files_modified,
            summary.files_unchanged,
            summary.files_failed
        );
        Ok(summary)
    }

    fn process_file(&self, path: &Path, pass: &dyn DocumentPass) -> FileOutcome {
        match self.try_process_file(path, pass) {
            Ok(Some(metrics)) => FileOutcome::Modified(metrics),
            Ok(None) => FileOutcome::Unchanged,
            Err(e) => {
                log::warn!("{}: {}", path.display(), e);
                FileOutcome::Failed(e.to_string())
            }
        }
    }

    fn try_process_file(
        &self,
        path: &Path,
        pass: &dyn DocumentPass,
    ) -> Result<Option<Metrics>, DocumentError> {
        let mut document = WorkflowDocument::from_file(path)?;
        let outcome = pass.apply(&mut document);
        if !outcome.changed {
            return Ok(None);
        }
        if self.mode == RunMode::Apply {
            let contents = document.to_pretty_json()?;
            backup_file(path, &self.root, &self.backup_dir)?;
            write_atomic(path, &contents)?;
            log::debug!("rewrote {}", path.display());
        }
        Ok(Some(outcome.metrics))
    }
}
