//! Label-indexed pattern forest.
//!
//! Host patterns are organized by dotted label, least-specific (TLD) label
//! first, so lookup cost is proportional to the label count of the query
//! hostname rather than to the number of configured patterns. An exact
//! label always beats a wildcard label at the same depth; among several
//! wildcard labels at one depth the first in sibling order wins.

mod node;
mod search;

use node::SiblingList;

/// One pattern tree, holding records of a single kind.
#[derive(Debug)]
pub struct MatchTree<R> {
    root: SiblingList<R>,
    records: usize,
}

impl<R> MatchTree<R> {
    pub fn new() -> Self {
        Self {
            root: SiblingList::new(),
            records: 0,
        }
    }

    /// Number of records inserted. Re-inserting an identical pattern
    /// appends another record to the same node, and counts here.
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Attach `record` at the terminal label of `labels` (host order, most
    /// specific first), creating nodes on demand and sharing prefixes from
    /// the least-specific end. Empty `labels` is a no-op.
    pub fn insert(&mut self, labels: &[&str], record: R) {
        let Some((terminal, prefix)) = labels.split_first() else {
            return;
        };

        let mut level = &mut self.root;
        for label in prefix.iter().rev() {
            let idx = level.ensure(label);
            level = &mut level.node_mut(idx).children;
        }
        let idx = level.ensure(terminal);
        level.node_mut(idx).records.push(record);
        self.records += 1;
    }
}

impl<R> Default for MatchTree<R> {
    fn default() -> Self {
        Self::new()
    }
}
