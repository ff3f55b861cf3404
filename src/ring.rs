use core::{
    fmt,
    iter::{self, FusedIterator},
};

use crate::{Deque, DequeError, End};

/// The smallest capacity a [`RingBufferDeque`] will ever have.
pub const MIN_CAPACITY: usize = 4;

/// Slot indices of the first and last logical element. Only exists while the
/// deque is non-empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    front: usize,
    back: usize,
}

/// A deque backed by a circular buffer.
///
/// The buffer doubles as soon as an insertion fills it and halves once a
/// removal leaves it at most a quarter full, but never drops below
/// [`MIN_CAPACITY`] slots. Both resizes unroll the contents so that the front
/// lands in slot 0.
#[derive(Clone)]
pub struct RingBufferDeque<T> {
    buf: Box<[Option<T>]>,
    span: Option<Span>,
    len: usize,
}

#[inline]
fn vacant_buf<T>(cap: usize) -> Box<[Option<T>]> {
    iter::repeat_with(|| None).take(cap).collect()
}

impl<T> RingBufferDeque<T> {
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty deque with `cap` slots, or [`MIN_CAPACITY`] if `cap` is smaller.
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self { buf: vacant_buf(cap.max(MIN_CAPACITY)), span: None, len: 0 }
    }

    /// Creates a deque with `cap` slots holding `data`, the first element placed
    /// in slot `front` and the rest following it, wrapping around the end of the
    /// buffer. Useful for putting the deque into a specific layout.
    ///
    /// If `data` fills every slot, the buffer is grown right away.
    pub fn with_contents<I>(data: I, front: usize, cap: usize) -> Result<Self, DequeError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut this = Self::with_capacity(cap);
        let cap = this.capacity();
        let data: Vec<T> = data.into_iter().collect();
        if data.is_empty() {
            return Ok(this);
        }
        if front >= cap {
            return Err(DequeError::OffsetOutOfRange { front, cap });
        }
        if data.len() > cap {
            return Err(DequeError::TooManyElements { len: data.len(), cap });
        }

        let len = data.len();
        for (i, val) in data.into_iter().enumerate() {
            this.buf[(front + i) % cap] = Some(val);
        }
        this.len = len;
        this.span = Some(Span { front, back: (front + len - 1) % cap });

        if this.len == cap {
            this.grow();
        }
        Ok(this)
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
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Slot index of the front element, `None` if empty.
    #[inline]
    pub fn front_index(&self) -> Option<usize> {
        self.span.map(|s| s.front)
    }

    /// Slot index of the back element, `None` if empty.
    #[inline]
    pub fn back_index(&self) -> Option<usize> {
        self.span.map(|s| s.back)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.span.and_then(|s| self.buf[s.front].as_ref())
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.span.and_then(|s| self.buf[s.back].as_ref())
    }

    #[inline]
    fn wrap_inc(&self, idx: usize) -> usize {
        if idx == self.capacity() - 1 {
            0
        } else {
            idx + 1
        }
    }

    #[inline]
    fn wrap_dec(&self, idx: usize) -> usize {
        idx.checked_sub(1).unwrap_or(self.capacity() - 1)
    }

    pub fn enqueue(&mut self, val: T, end: End) {
        let span = match (self.span, end) {
            (None, _) => Span { front: 0, back: 0 },
            (Some(s), End::Front) => Span { front: self.wrap_dec(s.front), ..s },
            (Some(s), End::Back) => Span { back: self.wrap_inc(s.back), ..s },
        };
        let idx = match end {
            End::Front => span.front,
            End::Back => span.back,
        };
        debug_assert!(self.buf[idx].is_none(), "enqueue would overwrite slot {idx}");

        self.buf[idx] = Some(val);
        self.span = Some(span);
        self.len += 1;

        if self.len == self.capacity() {
            self.grow();
        }
    }

    pub fn dequeue(&mut self, end: End) -> Option<T> {
        let span = self.span?;
        let (idx, rest) = match end {
            End::Front => (span.front, Span { front: self.wrap_inc(span.front), ..span }),
            End::Back => (span.back, Span { back: self.wrap_dec(span.back), ..span }),
        };

        let val = self.buf[idx].take();
        debug_assert!(val.is_some(), "occupied slot {idx} was empty");
        self.len -= 1;
        self.span = if self.len == 0 { None } else { Some(rest) };

        // checked against the capacity before halving
        let cap = self.capacity();
        if self.len <= cap / 4 && cap / 2 >= MIN_CAPACITY {
            self.shrink();
        }

        val
    }

    /// Doubles the capacity.
    pub fn grow(&mut self) {
        self.relocate(self.capacity() * 2);
    }

    /// Halves the capacity, never going below [`MIN_CAPACITY`]. Does nothing if
    /// the smaller buffer would not leave at least one slot free.
    pub fn shrink(&mut self) {
        let new_cap = (self.capacity() / 2).max(MIN_CAPACITY);
        if new_cap == self.capacity() || new_cap <= self.len {
            return;
        }
        self.relocate(new_cap);
    }

    /// Moves the contents into a fresh buffer of `new_cap` slots, front first.
    #[cold]
    fn relocate(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= MIN_CAPACITY);
        debug_assert!(new_cap > self.len);

        let old_cap = self.capacity();
        let mut buf = vacant_buf(new_cap);
        if let Some(span) = self.span {
            for (i, slot) in buf.iter_mut().take(self.len).enumerate() {
                *slot = self.buf[(span.front + i) % old_cap].take();
            }
            self.span = Some(Span { front: 0, back: self.len - 1 });
        }
        self.buf = buf;

        log::trace!("resized ring buffer from {old_cap} to {new_cap} slots holding {}", self.len);
    }

    /// Walks the elements from front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { buf: &self.buf, head: self.span.map_or(0, |s| s.front), remaining: self.len }
    }
}

impl<T> Default for RingBufferDeque<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deque<T> for RingBufferDeque<T> {
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

impl<T> Extend<T> for RingBufferDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|val| self.enqueue(val, End::Back));
    }
}

impl<T> FromIterator<T> for RingBufferDeque<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T: PartialEq> PartialEq for RingBufferDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingBufferDeque<T> {}

impl<T: fmt::Debug> fmt::Debug for RingBufferDeque<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the raw buffer, marking the front slot with `(F)` and the back slot
/// with `(B)`. A lone element only gets the front marker.
impl<T: fmt::Display> fmt::Display for RingBufferDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(span) = self.span else {
            return f.write_str("CircularDeque <empty>");
        };

        f.write_str("CircularDeque <")?;
        for (i, slot) in self.buf.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match slot {
                Some(val) => write!(f, "{val}")?,
                None => f.write_str("None")?,
            }
            if i == span.front {
                f.write_str("(F)")?;
            } else if i == span.back {
                f.write_str("(B)")?;
            }
        }
        f.write_str(">")
    }
}

impl<'a, T> IntoIterator for &'a RingBufferDeque<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    buf: &'a [Option<T>],
    head: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let val = self.buf[self.head].as_ref();
        self.head = if self.head == self.buf.len() - 1 { 0 } else { self.head + 1 };
        self.remaining -= 1;
        val
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.buf[(self.head + self.remaining) % self.buf.len()].as_ref()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { buf: self.buf, head: self.head, remaining: self.remaining }
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}
