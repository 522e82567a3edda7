use crate::pass::Metrics;
use std::fmt;
use std::path::PathBuf;

/// What happened to one file during a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Modified(Metrics),
    Unchanged,
    Failed(String),
}

/// Aggregate report for a batch run.
///
/// Pass metrics are summed over modified files only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total_files: usize,
    pub files_modified: usize,
    pub files_unchanged: usize,
    pub files_failed: usize,
    pub metrics: Metrics,
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        self.total_files += 1;
        match outcome {
            FileOutcome::Modified(metrics) => {
                self.files_modified += 1;
                self.metrics.merge(&metrics);
            }
            FileOutcome::Unchanged => self.files_unchanged += 1,
            FileOutcome::Failed(message) => {
                self.files_failed += 1;
                self.failures.push((path, message));
            }
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RESULT:")?;
        writeln!(f, "  - files_failed: {}", self.files_failed)?;
        writeln!(f, "  - files_modified: {}", self.files_modified)?;
        writeln!(f, "  - files_unchanged: {}", self.files_unchanged)?;
        write!(f, "{}", self.metrics)?;
        writeln!(f, "  - total_files: {}", self.total_files)?;
        if !self.failures.is_empty() {
            writeln!(f, "FAILURES:")?;
            for (path, message) in &self.failures {
                writeln!(f, "  - {}: {}", path.display(), message)?;
            }
        }
        Ok(())
    }
}
