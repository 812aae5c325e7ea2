//! Min-priority frontier shared by the routing and spanning-tree engines.
//!
//! `BinaryHeap` is a max-heap and has no decrease-key, so entries compare in
//! reverse and improved candidates are simply pushed again. Consumers discard
//! stale entries after popping them.
//!
//! Ordering is total and deterministic: lower cost first, then the
//! lexicographically smaller node ID, then the earlier insertion.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<'g, T> {
    cost: f64,
    node: &'g str,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Entry<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<'_, T> {}

impl<T> Ord for Entry<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the heap pops the cheapest entry
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of `(cost, node, payload)` candidates.
pub(crate) struct Frontier<'g, T> {
    heap: BinaryHeap<Entry<'g, T>>,
    next_seq: u64,
}

impl<'g, T> Frontier<'g, T> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub(crate) fn push(&mut self, cost: f64, node: &'g str, payload: T) {
        self.heap.push(Entry {
            cost,
            node,
            seq: self.next_seq,
            payload,
        });
        self.next_seq += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<(f64, &'g str, T)> {
        self.heap
            .pop()
            .map(|entry| (entry.cost, entry.node, entry.payload))
    }

    /// Total number of entries ever pushed.
    pub(crate) fn pushed(&self) -> u64 {
        self.next_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_cheapest_first() {
        let mut frontier = Frontier::new();
        frontier.push(5.0, "a", ());
        frontier.push(1.0, "b", ());
        frontier.push(3.0, "c", ());

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|(cost, node, _)| (cost, node))
            .collect();
        assert_eq!(order, vec![(1.0, "b"), (3.0, "c"), (5.0, "a")]);
    }

    #[test]
    fn test_ties_break_by_node_then_insertion() {
        let mut frontier = Frontier::new();
        frontier.push(2.0, "m", 0);
        frontier.push(2.0, "b", 1);
        frontier.push(2.0, "m", 2);

        assert_eq!(frontier.pop(), Some((2.0, "b", 1)));
        assert_eq!(frontier.pop(), Some((2.0, "m", 0)));
        assert_eq!(frontier.pop(), Some((2.0, "m", 2)));
        assert_eq!(frontier.pop(), None);
        assert_eq!(frontier.pushed(), 3);
    }

    #[test]
    fn test_infinity_sorts_last() {
        let mut frontier = Frontier::new();
        frontier.push(f64::INFINITY, "a", ());
        frontier.push(1e300, "z", ());
        assert_eq!(frontier.pop().map(|(_, node, _)| node), Some("z"));
    }
}
