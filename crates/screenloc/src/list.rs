//! Traversal of singly linked lists living in foreign memory.
//!
//! A list is a chain of nodes, each holding a pointer to its value and a
//! pointer to the next node. An empty slot (null value pointer) is skipped
//! without ending the chain; only a null next pointer ends it.

use std::collections::HashSet;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::process::layout::{limits, node};
use crate::process::{Address, ReadMemory};

/// Field offsets of a list node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLayout {
    pub value_offset: u64,
    pub next_offset: u64,
}

impl Default for ListLayout {
    fn default() -> Self {
        Self {
            value_offset: node::VALUE,
            next_offset: node::NEXT,
        }
    }
}

/// One node decoded at a moment in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListNode {
    pub value: Address,
    pub next: Address,
}

impl ListNode {
    pub fn read<R: ReadMemory + ?Sized>(
        reader: &R,
        address: Address,
        layout: ListLayout,
    ) -> Result<Self> {
        Ok(Self {
            value: reader.read_pointer(address.offset(layout.value_offset))?,
            next: reader.read_pointer(address.offset(layout.next_offset))?,
        })
    }
}

/// A linked list rooted at `head`. Each call to [`iter`](LinkedList::iter)
/// starts a fresh traversal.
pub struct LinkedList<'a, R: ReadMemory + ?Sized> {
    reader: &'a R,
    head: Address,
    layout: ListLayout,
    max_nodes: usize,
}

impl<'a, R: ReadMemory + ?Sized> LinkedList<'a, R> {
    pub fn new(reader: &'a R, head: Address) -> Self {
        Self {
            reader,
            head,
            layout: ListLayout::default(),
            max_nodes: limits::MAX_NODES,
        }
    }

    pub fn with_layout(mut self, layout: ListLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn head(&self) -> Address {
        self.head
    }

    pub fn iter(&self) -> Values<'a, R> {
        Values {
            reader: self.reader,
            head: self.head,
            layout: self.layout,
            max_nodes: self.max_nodes,
            current: self.head,
            visited: HashSet::new(),
            done: false,
        }
    }
}

impl<'a, R: ReadMemory + ?Sized> IntoIterator for &LinkedList<'a, R> {
    type Item = Result<Address>;
    type IntoIter = Values<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walk the list at `head` with the default layout and bound.
pub fn walk<R: ReadMemory + ?Sized>(reader: &R, head: Address) -> Values<'_, R> {
    LinkedList::new(reader, head).iter()
}

/// Lazy iterator over the non-null value pointers of a list.
///
/// Yields at most one `Err`, after which it is exhausted.
pub struct Values<'a, R: ReadMemory + ?Sized> {
    reader: &'a R,
    head: Address,
    layout: ListLayout,
    max_nodes: usize,
    current: Address,
    visited: HashSet<Address>,
    done: bool,
}

impl<R: ReadMemory + ?Sized> Values<'_, R> {
    fn fail(&mut self, error: Error) -> Option<Result<Address>> {
        debug!("List walk from {} stopped: {}", self.head, error);
        self.done = true;
        Some(Err(error))
    }
}

impl<R: ReadMemory + ?Sized> Iterator for Values<'_, R> {
    type Item = Result<Address>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if self.current.is_null() {
                self.done = true;
                return None;
            }

            if self.visited.len() >= self.max_nodes || !self.visited.insert(self.current) {
                return self.fail(Error::TraversalBoundExceeded {
                    head: self.head,
                    limit: self.max_nodes,
                });
            }

            let node = match ListNode::read(self.reader, self.current, self.layout) {
                Ok(node) => node,
                Err(e) => return self.fail(e),
            };
            trace!(
                "Node {}: value={} next={}",
                self.current, node.value, node.next
            );
            self.current = node.next;

            if !node.value.is_null() {
                return Some(Ok(node.value));
            }
        }
        None
    }
}

impl<R: ReadMemory + ?Sized> FusedIterator for Values<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockMemoryBuilder;

    fn collect_ok<I: IntoIterator<Item = Result<Address>>>(iter: I) -> Vec<u64> {
        iter.into_iter().map(|r| r.unwrap().value()).collect()
    }

    #[test]
    fn test_null_head_is_empty() {
        let reader = MockMemoryBuilder::new().build();
        assert_eq!(walk(&reader, Address::NULL).count(), 0);
        assert_eq!(reader.read_count(), 0);
    }

    #[test]
    fn test_walk_in_chain_order() {
        let reader = MockMemoryBuilder::new()
            .write_node(0x100, 0xA000, 0x200)
            .write_node(0x200, 0xB000, 0x300)
            .write_node(0x300, 0xC000, 0)
            .build();

        let values = collect_ok(walk(&reader, Address::new(0x100)));
        assert_eq!(values, vec![0xA000, 0xB000, 0xC000]);
        // value + next per node
        assert_eq!(reader.read_count(), 6);
    }

    #[test]
    fn test_null_value_is_skipped_but_chain_continues() {
        let reader = MockMemoryBuilder::new()
            .write_node(0x100, 0, 0x200)
            .write_node(0x200, 0xB000, 0)
            .build();

        let values = collect_ok(walk(&reader, Address::new(0x100)));
        assert_eq!(values, vec![0xB000]);
    }

    #[test]
    fn test_single_empty_node() {
        let reader = MockMemoryBuilder::new().write_node(0x100, 0, 0).build();
        assert_eq!(walk(&reader, Address::new(0x100)).count(), 0);
    }

    #[test]
    fn test_self_referential_node_terminates() {
        let reader = MockMemoryBuilder::new()
            .write_node(0x100, 0xA000, 0x100)
            .build();

        let items: Vec<_> = walk(&reader, Address::new(0x100)).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap().value(), 0xA000);
        assert!(matches!(
            items[1],
            Err(Error::TraversalBoundExceeded { .. })
        ));
    }

    #[test]
    fn test_longer_cycle_terminates() {
        let reader = MockMemoryBuilder::new()
            .write_node(0x100, 0xA000, 0x200)
            .write_node(0x200, 0, 0x300)
            .write_node(0x300, 0xC000, 0x100)
            .build();

        let items: Vec<_> = walk(&reader, Address::new(0x100)).collect();
        assert_eq!(items.len(), 3);
        assert!(items[2].is_err());
    }

    #[test]
    fn test_max_nodes_bound() {
        let reader = MockMemoryBuilder::new()
            .write_node(0x100, 0xA000, 0x200)
            .write_node(0x200, 0xB000, 0x300)
            .write_node(0x300, 0xC000, 0)
            .build();

        let list = LinkedList::new(&reader, Address::new(0x100)).with_max_nodes(2);
        let items: Vec<_> = list.iter().collect();
        assert_eq!(items.len(), 3);
        assert!(matches!(
            items[2],
            Err(Error::TraversalBoundExceeded { limit: 2, .. })
        ));
    }

    #[test]
    fn test_read_failure_keeps_earlier_values() {
        let reader = MockMemoryBuilder::new()
            .write_node(0x100, 0xA000, 0x200)
            .build();

        let mut iter = walk(&reader, Address::new(0x100));
        assert_eq!(iter.next().unwrap().unwrap(), Address::new(0xA000));
        assert!(matches!(
            iter.next(),
            Some(Err(Error::InaccessibleMemory { .. }))
        ));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iter_restarts_traversal() {
        let reader = MockMemoryBuilder::new()
            .write_node(0x100, 0xA000, 0x200)
            .write_node(0x200, 0xB000, 0)
            .build();

        let list = LinkedList::new(&reader, Address::new(0x100));
        let mut first = list.iter();
        first.next();
        assert_eq!(collect_ok(list.iter()), vec![0xA000, 0xB000]);
        assert_eq!(collect_ok(&list), vec![0xA000, 0xB000]);
    }

    #[test]
    fn test_custom_layout() {
        let reader = MockMemoryBuilder::new()
            .write_u64(0x100, 0x200)
            .write_u64(0x108, 0xA000)
            .write_u64(0x200, 0)
            .write_u64(0x208, 0xB000)
            .build();

        let layout = ListLayout {
            value_offset: 8,
            next_offset: 0,
        };
        let list = LinkedList::new(&reader, Address::new(0x100)).with_layout(layout);
        assert_eq!(collect_ok(list.iter()), vec![0xA000, 0xB000]);
    }
}
