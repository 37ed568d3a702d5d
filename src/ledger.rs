use std::collections::HashMap;

use crate::models::{ThoughtRecord, ThoughtSummary};
use crate::visual::VisualOutput;

/// Append-only thought history plus the branch index derived from it.
///
/// Both collections are private; callers only get counts and ids.
#[derive(Debug, Default)]
pub struct ThoughtLedger {
    history: Vec<ThoughtRecord>,
    branches: HashMap<String, Vec<ThoughtRecord>>,
    branch_order: Vec<String>,
    visual: Option<VisualOutput>,
}

impl ThoughtLedger {
    /// Create an empty ledger. With `log_thoughts` set, every accepted
    /// record is also rendered to stderr.
    pub fn new(log_thoughts: bool) -> Self {
        Self {
            visual: log_thoughts.then(VisualOutput::new),
            ..Default::default()
        }
    }

    /// Store a validated record and summarise the ledger after the insert
    pub fn record(&mut self, mut entry: ThoughtRecord) -> ThoughtSummary {
        if entry.exceeds_total() {
            tracing::debug!(
                "Raising totalThoughts from {} to {}",
                entry.total_thoughts,
                entry.thought_number
            );
            entry.total_thoughts = entry.thought_number.clone();
        }

        self.history.push(entry.clone());

        if let Some(branch_id) = entry.branch_key() {
            if !self.branches.contains_key(&branch_id) {
                self.branch_order.push(branch_id.clone());
            }
            self.branches
                .entry(branch_id)
                .or_default()
                .push(entry.clone());
        }

        if let Some(visual) = &self.visual {
            visual.display_thought(&entry);
        }

        ThoughtSummary {
            thought_number: entry.thought_number,
            total_thoughts: entry.total_thoughts,
            next_thought_needed: entry.next_thought_needed,
            branches: self.branch_order.clone(),
            thought_history_length: self.history.len(),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Branch ids in the order they were first seen
    pub fn branch_ids(&self) -> &[String] {
        &self.branch_order
    }

    pub fn branch_len(&self, branch_id: &str) -> Option<usize> {
        self.branches.get(branch_id).map(Vec::len)
    }

    pub fn last_thought(&self) -> Option<&ThoughtRecord> {
        self.history.last()
    }
}
