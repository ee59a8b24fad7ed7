use std::borrow::Cow;
use std::collections::HashMap;

use crate::glob::glob_match;

/// One label at one depth of the tree.
///
/// `records` is non-empty only on nodes terminating at least one inserted
/// pattern; pure prefix nodes carry none.
#[derive(Debug)]
pub(crate) struct Node<R> {
    /// Stored label text, lowercased (may contain `*`/`?` metacharacters)
    pub label: String,
    /// True when `label` contains a glob metacharacter
    pub wildcard: bool,
    /// Labels one level more specific
    pub children: SiblingList<R>,
    /// Records whose pattern terminates at this label, in insertion order
    pub records: Vec<R>,
}

/// Competing labels at one depth: a node arena plus an exact-lookup map
/// and the traversal order used for the wildcard pass.
#[derive(Debug)]
pub(crate) struct SiblingList<R> {
    nodes: Vec<Node<R>>,
    /// Lowercased label -> arena index. This lookup is never glob-aware, so
    /// a literal `"c?m"` and a literal `"com"` stay distinct nodes.
    by_label: HashMap<String, usize>,
    /// Traversal order. New entries splice in right after the head, and the
    /// first wildcard in this order wins a tie between wildcard matches.
    order: Vec<usize>,
}

impl<R> SiblingList<R> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            by_label: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Find the node for a label, creating it if absent. Exact lookup only.
    pub fn ensure(&mut self, label: &str) -> usize {
        let key = label.to_ascii_lowercase();
        if let Some(&idx) = self.by_label.get(&key) {
            return idx;
        }

        let wildcard = key.contains('*') || key.contains('?');
        let idx = self.nodes.len();
        self.nodes.push(Node {
            label: key.clone(),
            wildcard,
            children: SiblingList::new(),
            records: Vec::new(),
        });
        self.by_label.insert(key, idx);
        // Splice in right after the current list head, or as the sole entry
        let pos = self.order.len().min(1);
        self.order.insert(pos, idx);
        idx
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut Node<R> {
        &mut self.nodes[idx]
    }

    /// Two-pass label lookup: exact case-insensitive equality first, then
    /// the first wildcard node in traversal order whose stored label
    /// glob-matches the query. Exact always wins regardless of order.
    pub fn find_label(&self, query: &str) -> Option<&Node<R>> {
        // Normalize only when uppercase bytes are present, to avoid
        // allocating on the common already-lowercase path.
        let key: Cow<str> = if query.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(query.to_ascii_lowercase())
        } else {
            Cow::Borrowed(query)
        };

        if let Some(&idx) = self.by_label.get(key.as_ref()) {
            return Some(&self.nodes[idx]);
        }

        self.order
            .iter()
            .map(|&idx| &self.nodes[idx])
            .find(|node| node.wildcard && glob_match(&node.label, query))
    }
}
