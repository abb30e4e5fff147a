use std::collections::HashSet;

use crate::record::{PlotId, PlotRecord};

/// Outcome of diffing the tracked plot ids against a freshly loaded batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// In the batch but not tracked, in batch order.
    pub to_add: Vec<PlotId>,
    /// Tracked but missing from the batch, in tracked order.
    pub to_remove: Vec<PlotId>,
    pub unchanged: Vec<PlotId>,
}

impl Reconciliation {
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Set difference between `previous` and the ids of `records`. An empty
/// batch removes everything. Duplicate ids are reported once.
pub fn reconcile(previous: &[PlotId], records: &[PlotRecord]) -> Reconciliation {
    let incoming: HashSet<PlotId> = records.iter().map(|r| r.id).collect();
    let tracked: HashSet<PlotId> = previous.iter().copied().collect();

    let mut out = Reconciliation::default();
    let mut seen = HashSet::new();
    for id in previous {
        if !seen.insert(*id) {
            continue;
        }
        if incoming.contains(id) {
            out.unchanged.push(*id);
        } else {
            out.to_remove.push(*id);
        }
    }

    let mut seen = HashSet::new();
    for record in records {
        if !tracked.contains(&record.id) && seen.insert(record.id) {
            out.to_add.push(record.id);
        }
    }
    out
}
