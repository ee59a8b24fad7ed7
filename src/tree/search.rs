use tracing::warn;

use super::node::Node;
use super::MatchTree;
use crate::glob::glob_match;

impl<R> MatchTree<R> {
    /// Walk the forest for `labels` (host order, most specific first) and
    /// return the records of the best-matching terminal node.
    ///
    /// Matching proceeds depth by depth from the least-specific label,
    /// mirroring insertion. At each sibling list an exact label match beats
    /// any wildcard match; a wildcard node may then absorb consecutive
    /// query labels (it stands in for a variable number of lower-level
    /// labels) until one of its children claims the next label or the
    /// wildcard stops matching. Each step consumes at least one label, so
    /// the walk terminates.
    pub fn find(&self, labels: &[&str]) -> Option<&[R]> {
        if labels.is_empty() {
            return None;
        }

        let mut level = &self.root;
        let mut i = labels.len(); // labels[i - 1] is the next label to match
        loop {
            let node = level.find_label(labels[i - 1])?;
            i -= 1;
            if i == 0 {
                return terminal(node);
            }

            if node.wildcard {
                // One wildcard label matches one hostname label per tree
                // level, but it may absorb several consecutive query labels:
                // keep absorbing while no child claims the next label and
                // the wildcard itself still matches it.
                while i > 0 {
                    let next = labels[i - 1];
                    if node.children.find_label(next).is_some() {
                        break;
                    }
                    if !glob_match(&node.label, next) {
                        break;
                    }
                    i -= 1;
                    if i == 0 {
                        return terminal(node);
                    }
                }
            }

            level = &node.children;
        }
    }
}

/// A search ending on a record-less node reports no match. This happens
/// when the final query label lands on a pure prefix node (which may shadow
/// a wildcard sibling); the host simply matches no configured pattern.
fn terminal<R>(node: &Node<R>) -> Option<&[R]> {
    if node.records.is_empty() {
        warn!(label = %node.label, "search ended on a node with no records");
        return None;
    }
    Some(&node.records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_single_level() {
        let mut tree = MatchTree::new();
        tree.insert(&["*", "com"], 1);
        assert_eq!(tree.find(&["foo", "com"]), Some(&[1][..]));
        assert_eq!(tree.find(&["foo", "org"]), None);
        // the wildcard is one level down; "com" alone ends on a prefix node
        assert_eq!(tree.find(&["com"]), None);
    }

    #[test]
    fn test_wildcard_absorbs_multiple_labels() {
        let mut tree = MatchTree::new();
        tree.insert(&["*", "com"], 1);
        assert_eq!(tree.find(&["a", "b", "com"]), Some(&[1][..]));
        assert_eq!(tree.find(&["a", "b", "c", "d", "com"]), Some(&[1][..]));
    }

    #[test]
    fn test_catch_all() {
        let mut tree = MatchTree::new();
        tree.insert(&["*"], 1);
        assert_eq!(tree.find(&["localhost"]), Some(&[1][..]));
        assert_eq!(tree.find(&["a", "b", "c"]), Some(&[1][..]));
    }

    #[test]
    fn test_exact_branch_beats_wildcard_absorption() {
        let mut tree = MatchTree::new();
        tree.insert(&["*", "net"], 1);
        tree.insert(&["*", "underworld", "net"], 2);
        // "underworld" is an exact sibling of "*" under net, so the walk
        // descends there instead of letting "*.net" absorb both labels
        assert_eq!(tree.find(&["uwns", "underworld", "net"]), Some(&[2][..]));
        assert_eq!(tree.find(&["uwns", "overworld", "net"]), Some(&[1][..]));
    }

    #[test]
    fn test_child_claim_stops_absorption() {
        let mut tree = MatchTree::new();
        tree.insert(&["*", "com"], 1);
        tree.insert(&["mail", "*", "com"], 2);
        // "mail" is claimed by a child of the "*" node, ending absorption
        assert_eq!(tree.find(&["mail", "foo", "com"]), Some(&[2][..]));
        assert_eq!(tree.find(&["smtp", "foo", "com"]), Some(&[1][..]));
        // with nothing left after the wildcard, "*" itself is terminal
        assert_eq!(tree.find(&["mail", "com"]), Some(&[1][..]));
    }

    #[test]
    fn test_absorption_stops_when_wildcard_no_longer_matches() {
        let mut tree = MatchTree::new();
        tree.insert(&["?oo", "com"], 1);
        assert_eq!(tree.find(&["foo", "com"]), Some(&[1][..]));
        // "?oo" matches "boo" but cannot absorb "bar" behind it
        assert_eq!(tree.find(&["bar", "boo", "com"]), None);
        assert_eq!(tree.find(&["zoo", "boo", "com"]), Some(&[1][..]));
    }

    #[test]
    fn test_more_specific_wildcard_wins() {
        let mut tree = MatchTree::new();
        tree.insert(&["*", "varner", "com"], 1);
        tree.insert(&["*", "koruna", "varner", "com"], 2);
        assert_eq!(
            tree.find(&["mail", "koruna", "varner", "com"]),
            Some(&[2][..])
        );
        assert_eq!(tree.find(&["mail", "other", "varner", "com"]), Some(&[1][..]));
    }

    #[test]
    fn test_literal_metacharacter_lookalike_stays_distinct() {
        let mut tree = MatchTree::new();
        tree.insert(&["irc", "c?m"], 1);
        tree.insert(&["irc", "com"], 2);
        // exact beats wildcard at the TLD level
        assert_eq!(tree.find(&["irc", "com"]), Some(&[2][..]));
        assert_eq!(tree.find(&["irc", "cam"]), Some(&[1][..]));
    }

    #[test]
    fn test_wildcard_tie_break_is_sibling_order() {
        let mut tree = MatchTree::new();
        tree.insert(&["*", "com"], 1);
        tree.insert(&["?oo", "com"], 2);
        // both wildcards match "foo"; the first in sibling order wins, and
        // repeated searches keep returning the same one
        for _ in 0..3 {
            assert_eq!(tree.find(&["foo", "com"]), Some(&[1][..]));
        }
    }

    #[test]
    fn test_empty_labels_policy_is_symmetric() {
        let mut tree = MatchTree::new();
        tree.insert(&["foo", "", "com"], 1);
        assert_eq!(tree.find(&["foo", "", "com"]), Some(&[1][..]));
        assert_eq!(tree.find(&["foo", "com"]), None);
    }

    #[test]
    fn test_empty_forest() {
        let tree: MatchTree<u32> = MatchTree::new();
        assert_eq!(tree.find(&["foo", "com"]), None);
    }
}
