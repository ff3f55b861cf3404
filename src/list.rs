//! A circular doubly-linked list and the deque built on top of it.
//!
//! Nodes are stored in an arena owned by the [`CircularList`] and refer to
//! their neighbours by [`NodeId`], so the ring never holds owning pointers.
//! The node at `head` is the front of the list and `head`'s predecessor is
//! the back.

use core::{fmt, iter::FusedIterator};

use crate::{Deque, End};

/// Index of a node in its list's arena. Only meaningful for the list that
/// handed it out, and only until the next removal from that list, which may
/// compact the arena and renumber every node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct CircularNode<T> {
    value: T,
    next: NodeId,
    prev: NodeId,
}

impl<T> CircularNode<T> {
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn next(&self) -> NodeId {
        self.next
    }

    #[inline]
    pub fn prev(&self) -> NodeId {
        self.prev
    }
}

/// Nodes compare by value only.
impl<T: PartialEq> PartialEq for CircularNode<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Display> fmt::Display for CircularNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<= ({}) =>", self.value)
    }
}

// arenas smaller than this are never compacted
const MIN_ARENA: usize = 8;

#[derive(Clone)]
pub struct CircularList<T> {
    nodes: Vec<Option<CircularNode<T>>>,
    // vacated arena slots, reused before the arena grows
    free: Vec<usize>,
    head: Option<NodeId>,
    len: usize,
}

impl<T> CircularList<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { nodes: Vec::new(), free: Vec::new(), head: None, len: 0 }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Returns the node behind `id`, or `None` if it has been removed.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&CircularNode<T>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|head| &self.at(head).value)
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.head.map(|head| &self.at(self.at(head).prev).value)
    }

    /// Every id reachable from `head` refers to a live node.
    #[inline]
    fn at(&self, id: NodeId) -> &CircularNode<T> {
        match &self.nodes[id.0] {
            Some(node) => node,
            None => unreachable!("{id:?} is linked into the ring but was freed"),
        }
    }

    #[inline]
    fn at_mut(&mut self, id: NodeId) -> &mut CircularNode<T> {
        match &mut self.nodes[id.0] {
            Some(node) => node,
            None => unreachable!("{id:?} is linked into the ring but was freed"),
        }
    }

    /// The id the next call to `alloc` will hand out.
    #[inline]
    fn vacant_id(&self) -> NodeId {
        NodeId(self.free.last().copied().unwrap_or(self.nodes.len()))
    }

    fn alloc(&mut self, node: CircularNode<T>) -> NodeId {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                NodeId(idx)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> CircularNode<T> {
        match self.nodes[id.0].take() {
            Some(node) => {
                self.free.push(id.0);
                node
            }
            None => unreachable!("{id:?} released twice"),
        }
    }

    /// Links a new node in between the back and `head`. Inserting at the front
    /// additionally moves `head` onto the new node.
    pub fn insert(&mut self, value: T, end: End) {
        let id = self.vacant_id();
        match self.head {
            None => {
                let new = self.alloc(CircularNode { value, next: id, prev: id });
                debug_assert_eq!(new, id);
                self.head = Some(id);
            }
            Some(head) => {
                let back = self.at(head).prev;
                let new = self.alloc(CircularNode { value, next: head, prev: back });
                debug_assert_eq!(new, id);
                self.at_mut(back).next = id;
                self.at_mut(head).prev = id;
                if end == End::Front {
                    self.head = Some(id);
                }
            }
        }
        self.len += 1;
        self.debug_check_head();
    }

    /// Unlinks the node at `end` and returns its value, or `None` if the list is empty.
    pub fn remove(&mut self, end: End) -> Option<T> {
        let head = self.head?;
        let target = match end {
            End::Front => head,
            End::Back => self.at(head).prev,
        };

        let node = self.release(target);
        if self.len == 1 {
            self.head = None;
            // nothing is linked anymore, so the whole arena can go
            self.nodes.clear();
            self.free.clear();
        } else {
            self.at_mut(node.prev).next = node.next;
            self.at_mut(node.next).prev = node.prev;
            if end == End::Front {
                self.head = Some(node.next);
            }
        }
        self.len -= 1;

        if self.nodes.len() >= MIN_ARENA && self.len <= self.nodes.len() / 4 {
            self.compact();
        }
        self.debug_check_head();

        Some(node.value)
    }

    /// Moves the live nodes into a fresh arena in ring order, starting at `head`,
    /// and drops every free slot. Renumbers all ids.
    #[cold]
    fn compact(&mut self) {
        let Some(head) = self.head else {
            return;
        };
        let (len, old_slots) = (self.len, self.nodes.len());
        let mut nodes = Vec::with_capacity(len);
        let mut cur = head;
        for i in 0..len {
            let node = match self.nodes[cur.0].take() {
                Some(node) => node,
                None => unreachable!("{cur:?} is linked into the ring but was freed"),
            };
            cur = node.next;
            nodes.push(Some(CircularNode {
                value: node.value,
                next: NodeId((i + 1) % len),
                prev: NodeId((i + len - 1) % len),
            }));
        }
        self.nodes = nodes;
        self.free = Vec::new();
        self.head = Some(NodeId(0));

        log::trace!("compacted list arena from {old_slots} to {len} slots");
    }

    /// Allocated arena slots, live or free.
    #[cfg(test)]
    pub(crate) fn arena_slots(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    fn debug_check_head(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        debug_assert_eq!(self.head.is_none(), self.len == 0);
        if let Some(head) = self.head {
            let node = self.at(head);
            debug_assert_eq!(self.at(node.next).prev, head);
            debug_assert_eq!(self.at(node.prev).next, head);
        }
    }

    /// Walks the values from front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { list: self, cur: self.head, remaining: self.len }
    }

    /// Follows every link in both directions and panics if the ring is broken.
    #[cfg(test)]
    pub(crate) fn assert_ring(&self) {
        let Some(head) = self.head else {
            assert_eq!(self.len, 0);
            return;
        };
        let (mut fwd, mut bwd) = (head, head);
        for _ in 0..self.len {
            let next = self.at(fwd).next;
            assert_eq!(self.at(next).prev, fwd);
            fwd = next;
            bwd = self.at(bwd).prev;
        }
        assert_eq!(fwd, head, "next links do not close after {} steps", self.len);
        assert_eq!(bwd, head, "prev links do not close after {} steps", self.len);
        assert_eq!(self.nodes.iter().filter(|n| n.is_some()).count(), self.len);
    }
}

impl<T> Default for CircularList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for CircularList<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let (mut a, mut b) = (self.head, other.head);
        for _ in 0..self.len {
            match (a, b) {
                (Some(x), Some(y)) => {
                    let (x, y) = (self.at(x), other.at(y));
                    if x != y {
                        return false;
                    }
                    a = Some(x.next);
                    b = Some(y.next);
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for CircularList<T> {}

impl<T: fmt::Debug> fmt::Debug for CircularList<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for CircularList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cur = self.head;
        for _ in 0..self.len {
            let Some(id) = cur else { break };
            let node = self.at(id);
            write!(f, "{node}")?;
            cur = Some(node.next);
        }
        Ok(())
    }
}

impl<'a, T> IntoIterator for &'a CircularList<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    list: &'a CircularList<T>,
    cur: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.at(self.cur?);
        self.cur = Some(node.next);
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { list: self.list, cur: self.cur, remaining: self.remaining }
    }
}

/// A deque that stores its elements in a [`CircularList`].
#[derive(Clone, PartialEq, Eq)]
pub struct ListDeque<T> {
    list: CircularList<T>,
}

impl<T> Default for ListDeque<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListDeque<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { list: CircularList::new() }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.list.front()
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.list.back()
    }

    #[inline]
    pub fn enqueue(&mut self, val: T, end: End) {
        self.list.insert(val, end)
    }

    #[inline]
    pub fn dequeue(&mut self, end: End) -> Option<T> {
        self.list.remove(end)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    #[inline]
    pub fn as_list(&self) -> &CircularList<T> {
        &self.list
    }
}

impl<T> Deque<T> for ListDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn front(&self) -> Option<&T> {
        self.front()
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        self.back()
    }

    #[inline]
    fn enqueue(&mut self, val: T, end: End) {
        self.enqueue(val, end)
    }

    #[inline]
    fn dequeue(&mut self, end: End) -> Option<T> {
        self.dequeue(end)
    }
}

impl<T> Extend<T> for ListDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|val| self.enqueue(val, End::Back));
    }
}

impl<T> FromIterator<T> for ListDeque<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T: fmt::Debug> fmt::Debug for ListDeque<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.list, f)
    }
}

impl<T: fmt::Display> fmt::Display for ListDeque<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.list, f)
    }
}

impl<'a, T> IntoIterator for &'a ListDeque<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
