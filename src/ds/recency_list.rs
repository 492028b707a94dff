//! Doubly linked recency list with its own node storage.
//!
//! Nodes sit in a `Vec<Option<Node<T>>>` and link to each other by
//! [`NodeId`]. A freed slot goes on the vacancy stack and is reused by the
//! next `push_back`, so a long-running cache that churns entries keeps a
//! fixed footprint once warm.
//!
//! ```text
//!   nodes: [ Some(b) | None | Some(a) | Some(c) ]     vacant: [1]
//!
//!   front (least recent)                 back (most recent)
//!   head ─► [#2 a] ◄──► [#0 b] ◄──► [#3 c] ◄── tail
//! ```
//!
//! `debug_validate_invariants()` is available in debug/test builds.

/// Handle to a linked node. Valid until that node is removed; afterwards the
/// slot may be handed to a different value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// List ordered from least recently promoted (front) to most recently
/// promoted (back).
#[derive(Debug)]
pub struct RecencyList<T> {
    nodes: Vec<Option<Node<T>>>,
    vacant: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> RecencyList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the least recent value.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the most recent value.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Stores `value` behind the current tail and returns its handle.
    pub fn push_back(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: self.tail,
            next: None,
        };
        let id = match self.vacant.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            },
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            },
        };

        match self.tail.and_then(|tail| self.node_mut(tail)) {
            Some(old_tail) => old_tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Unlinks the least recent node and frees its slot.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.unlink(id)?;
        let node = self.nodes[id.0].take()?;
        self.vacant.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Moves `id` to the most recent end; returns `false` if it is not linked.
    pub fn move_to_back(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.tail != Some(id) {
            self.unlink(id);
            self.link_back(id);
        }
        true
    }

    /// Drops every node. Storage is kept for reuse.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.vacant.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates values from least to most recent.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn unlink(&mut self, id: NodeId) -> Option<()> {
        let node = self.node_mut(id)?;
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev.and_then(|p| self.node_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.node_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }
        Some(())
    }

    fn link_back(&mut self, id: NodeId) {
        let old_tail = self.tail;
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.prev = old_tail;
        node.next = None;

        match old_tail.and_then(|t| self.node_mut(t)) {
            Some(tail_node) => tail_node.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let occupied = self.nodes.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(occupied, self.len, "len out of step with occupied slots");
        assert_eq!(
            occupied + self.vacant.len(),
            self.nodes.len(),
            "a slot is neither occupied nor vacant"
        );
        for &slot in &self.vacant {
            assert!(self.nodes[slot].is_none(), "vacant slot {slot} still holds a node");
        }

        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut walked = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let Some(node) = self.node(id) else {
                panic!("linked node {id:?} has no slot");
            };
            assert_eq!(node.prev, prev, "broken back link at {id:?}");
            prev = Some(id);
            current = node.next;
            walked += 1;
            assert!(walked <= self.len, "cycle in recency list");
        }

        assert_eq!(prev, self.tail);
        assert_eq!(walked, self.len);
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator from least to most recent.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.current?)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<T: Clone>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    mod ordering {
        use super::*;

        #[test]
        fn push_back_orders_oldest_first() {
            let mut list = RecencyList::new();
            list.push_back(1);
            list.push_back(2);
            list.push_back(3);

            assert_eq!(order(&list), vec![1, 2, 3]);
            assert_eq!(list.front(), Some(&1));
            assert_eq!(list.back(), Some(&3));
            list.debug_validate_invariants();
        }

        #[test]
        fn move_to_back_from_each_position() {
            let mut list = RecencyList::new();
            let a = list.push_back("a");
            let b = list.push_back("b");
            let c = list.push_back("c");

            assert!(list.move_to_back(b));
            assert_eq!(order(&list), vec!["a", "c", "b"]);
            list.debug_validate_invariants();

            assert!(list.move_to_back(a));
            assert_eq!(order(&list), vec!["c", "b", "a"]);
            list.debug_validate_invariants();

            assert!(list.move_to_back(a));
            assert_eq!(order(&list), vec!["c", "b", "a"]);

            assert_eq!(list.remove(c), Some("c"));
            assert!(!list.move_to_back(c));
            list.debug_validate_invariants();
        }

        #[test]
        fn remove_middle_relinks_neighbours() {
            let mut list = RecencyList::new();
            list.push_back(1);
            let mid = list.push_back(2);
            list.push_back(3);

            assert_eq!(list.remove(mid), Some(2));
            assert_eq!(order(&list), vec![1, 3]);
            list.debug_validate_invariants();
        }

        #[test]
        fn single_node_remove_clears_ends() {
            let mut list = RecencyList::new();
            let only = list.push_back(42);
            assert_eq!(list.remove(only), Some(42));
            assert_eq!(list.front(), None);
            assert_eq!(list.back(), None);
            list.debug_validate_invariants();
        }
    }

    mod storage {
        use super::*;

        #[test]
        fn evict_and_admit_churn_keeps_footprint() {
            // Steady state of a full cache: every admission follows an eviction.
            let mut list = RecencyList::with_capacity(3);
            for i in 0..3 {
                list.push_back(i);
            }
            for i in 3..50 {
                assert_eq!(list.pop_front(), Some(i - 3));
                list.push_back(i);
                list.debug_validate_invariants();
            }

            assert_eq!(list.nodes.len(), 3);
            assert_eq!(order(&list), vec![47, 48, 49]);
        }

        #[test]
        fn freed_slot_goes_to_next_admission() {
            let mut list = RecencyList::new();
            let first = list.push_back("stale");
            list.push_back("kept");

            list.pop_front();
            let reused = list.push_back("fresh");

            assert_eq!(reused, first);
            assert_eq!(list.get(reused), Some(&"fresh"));
            assert_eq!(order(&list), vec!["kept", "fresh"]);
            list.debug_validate_invariants();
        }

        #[test]
        fn removed_handle_is_dead_until_reused() {
            let mut list = RecencyList::new();
            let id = list.push_back(7);
            assert_eq!(list.remove(id), Some(7));

            assert_eq!(list.get(id), None);
            assert_eq!(list.remove(id), None);
            assert_eq!(list.pop_front(), None);
            assert_eq!(list.len(), 0);
            list.debug_validate_invariants();
        }

        #[test]
        fn get_mut_then_clear() {
            let mut list = RecencyList::new();
            let id = list.push_back(String::from("old"));
            if let Some(v) = list.get_mut(id) {
                v.push_str("-new");
            }
            assert_eq!(list.get(id).map(String::as_str), Some("old-new"));

            list.clear();
            assert_eq!(list.len(), 0);
            assert_eq!(list.get(id), None);
            list.debug_validate_invariants();
        }
    }
}
