use crate::workflow::WorkflowDocument;
use std::collections::BTreeMap;
use std::fmt;

/// Named counters reported by a pass, kept in key order for stable reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics(BTreeMap<&'static str, usize>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` to `key`. Zero counts are not recorded.
    pub fn add(&mut self, key: &'static str, count: usize) {
        if count > 0 {
            *self.0.entry(key).or_default() += count;
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn merge(&mut self, other: &Metrics) {
        for (key, count) in &other.0 {
            self.add(*key, *count);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.0.iter().map(|(key, count)| (*key, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, count) in self.iter() {
            writeln!(f, "  - {}: {}", key, count)?;
        }
        Ok(())
    }
}

/// What a pass did to one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    pub changed: bool,
    pub metrics: Metrics,
}

impl PassOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }
}

/// A transformation applied to one workflow document at a time.
///
/// Implementations never fail on malformed content; they repair what they can and
/// leave the rest. `Send + Sync` lets a batch fan documents out across threads.
pub trait DocumentPass: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, document: &mut WorkflowDocument) -> PassOutcome;
}

/// Runs several passes in order over the same document.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn DocumentPass>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pass(mut self, pass: impl DocumentPass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl DocumentPass for Pipeline {
    fn name(&self) -> &str {
        "pipeline"
    }

    fn apply(&self, document: &mut WorkflowDocument) -> PassOutcome {
        let mut outcome = PassOutcome::unchanged();
        for pass in &self.passes {
            let step = pass.apply(document);
            log::debug!("pass '{}' changed={}", pass.name(), step.changed);
            outcome.changed |= step.changed;
            outcome.metrics.merge(&step.metrics);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_skip_zero_and_merge() {
        let mut a = Metrics::new();
        a.add("dropped", 0);
        a.add("converted", 2);
        let mut b = Metrics::new();
        b.add("converted", 1);
        b.add("dropped", 3);
        a.merge(&b);
        assert_eq!(a.get("converted"), 3);
        assert_eq!(a.get("dropped"), 3);
        assert_eq!(a.get("missing"), 0);
        assert_eq!(a.to_string(), "  - converted: 3\n  - dropped: 3\n");
    }
}
