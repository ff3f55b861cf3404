//! Two interchangeable double-ended queues with amortized O(1) insertion and
//! removal at both ends:
//!
//! - [`RingBufferDeque`] keeps its elements in a circular buffer that doubles
//!   when it fills up and halves when it drops to a quarter full.
//! - [`ListDeque`] keeps them in a [`CircularList`], a circular doubly-linked
//!   list whose nodes live in an index-addressed arena.
//!
//! Both implement [`Deque`], so the same operation script can be run against
//! either one.
//!
//! ```
//! use circular_deque::{End, ListDeque, RingBufferDeque};
//!
//! let mut ring = RingBufferDeque::new();
//! let mut list = ListDeque::new();
//! for i in 0..4 {
//!     ring.enqueue(i, End::Back);
//!     list.enqueue(i, End::Back);
//! }
//! assert_eq!(ring.capacity(), 8);
//! assert_eq!(ring.dequeue(End::Front), list.dequeue(End::Front));
//! assert_eq!(ring.back(), list.back());
//! ```

pub mod error;
pub mod list;
pub mod ring;

#[cfg(test)]
mod proptests;

pub use error::DequeError;
pub use list::{CircularList, CircularNode, ListDeque, NodeId};
pub use ring::{RingBufferDeque, MIN_CAPACITY};

/// Selects which end of a deque an operation applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum End {
    Front,
    Back,
}

impl From<bool> for End {
    /// `true` selects the front.
    #[inline]
    fn from(front: bool) -> Self {
        if front {
            End::Front
        } else {
            End::Back
        }
    }
}

/// The operations shared by every deque in this crate.
pub trait Deque<T> {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the first element, or `None` if the deque is empty.
    fn front(&self) -> Option<&T>;

    /// Returns the last element, or `None` if the deque is empty.
    fn back(&self) -> Option<&T>;

    fn enqueue(&mut self, val: T, end: End);

    /// Removes and returns the element at `end`. Returns `None` and leaves the
    /// deque untouched if it is empty.
    fn dequeue(&mut self, end: End) -> Option<T>;

    #[inline]
    fn push_front(&mut self, val: T) {
        self.enqueue(val, End::Front)
    }

    #[inline]
    fn push_back(&mut self, val: T) {
        self.enqueue(val, End::Back)
    }

    #[inline]
    fn pop_front(&mut self) -> Option<T> {
        self.dequeue(End::Front)
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        self.dequeue(End::Back)
    }
}
