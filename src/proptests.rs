//! Property-based tests for both deques using proptest.

use std::collections::VecDeque;

use proptest::prelude::*;

use crate::{Deque, End, ListDeque, RingBufferDeque, MIN_CAPACITY};

#[derive(Clone, Copy, Debug)]
enum Op {
    Enqueue(End, i32),
    Dequeue(End),
}

fn end() -> impl Strategy<Value = End> {
    any::<bool>().prop_map(End::from)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (end(), any::<i32>()).prop_map(|(end, val)| Op::Enqueue(end, val)),
        2 => end().prop_map(Op::Dequeue),
    ]
}

fn apply<D: Deque<i32>>(d: &mut D, op: Op) -> Option<i32> {
    match op {
        Op::Enqueue(end, val) => {
            d.enqueue(val, end);
            None
        }
        Op::Dequeue(end) => d.dequeue(end),
    }
}

/// `a` and `b` differ by a power-of-two factor.
fn power_of_two_apart(a: usize, b: usize) -> bool {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi % lo == 0 && (hi / lo).is_power_of_two()
}

proptest! {
    #[test]
    fn test_length_accounting(ops in prop::collection::vec(op(), 0..400)) {
        let mut ring = RingBufferDeque::new();
        let mut list = ListDeque::new();
        let mut expected = 0usize;

        for op in ops {
            let removed = apply(&mut ring, op);
            prop_assert_eq!(apply(&mut list, op), removed);
            match op {
                Op::Enqueue(..) => expected += 1,
                Op::Dequeue(_) if removed.is_some() => expected -= 1,
                Op::Dequeue(_) => {}
            }
            prop_assert_eq!(ring.len(), expected);
            prop_assert_eq!(list.len(), expected);
        }
    }

    #[test]
    fn test_agrees_with_vecdeque(
        cap in 0usize..40,
        ops in prop::collection::vec(op(), 0..400),
    ) {
        let mut ring = RingBufferDeque::with_capacity(cap);
        let mut list = ListDeque::new();
        let mut model = VecDeque::new();

        for op in ops {
            let expected = match op {
                Op::Enqueue(End::Front, val) => { model.push_front(val); None }
                Op::Enqueue(End::Back, val) => { model.push_back(val); None }
                Op::Dequeue(End::Front) => model.pop_front(),
                Op::Dequeue(End::Back) => model.pop_back(),
            };
            prop_assert_eq!(apply(&mut ring, op), expected);
            prop_assert_eq!(apply(&mut list, op), expected);
            prop_assert_eq!(ring.front(), model.front());
            prop_assert_eq!(ring.back(), model.back());
            prop_assert_eq!(list.front(), model.front());
            prop_assert_eq!(list.back(), model.back());
        }

        prop_assert!(ring.iter().eq(model.iter()));
        prop_assert!(list.iter().eq(model.iter()));
        list.as_list().assert_ring();
    }

    #[test]
    fn test_capacity_invariant(
        cap in (0u32..7).prop_map(|k| 1usize << k),
        ops in prop::collection::vec(op(), 0..400),
    ) {
        let mut ring = RingBufferDeque::with_capacity(cap);
        let initial = ring.capacity();

        for op in ops {
            apply(&mut ring, op);
            prop_assert!(ring.capacity() >= MIN_CAPACITY);
            prop_assert!(ring.len() < ring.capacity());
            prop_assert!(power_of_two_apart(ring.capacity(), initial));
            prop_assert_eq!(ring.front_index().is_some(), !ring.is_empty());
            prop_assert_eq!(ring.back_index().is_some(), !ring.is_empty());
        }
    }

    #[test]
    fn test_fifo_round_trip(vals in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut ring = RingBufferDeque::new();
        let mut list = ListDeque::new();
        for &val in &vals {
            ring.push_back(val);
            list.push_back(val);
        }
        for &val in &vals {
            prop_assert_eq!(ring.pop_front(), Some(val));
            prop_assert_eq!(list.pop_front(), Some(val));
        }
        prop_assert!(ring.is_empty());
        prop_assert!(list.is_empty());
    }

    #[test]
    fn test_lifo_round_trip(vals in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut ring = RingBufferDeque::new();
        let mut list = ListDeque::new();
        for &val in &vals {
            ring.push_front(val);
            list.push_front(val);
        }
        for &val in vals.iter().rev() {
            prop_assert_eq!(ring.pop_front(), Some(val));
            prop_assert_eq!(list.pop_front(), Some(val));
        }
        prop_assert_eq!(ring.pop_front(), None);
        prop_assert_eq!(list.pop_back(), None);
    }

    #[test]
    fn test_seeded_layout(
        vals in prop::collection::vec(any::<i8>(), 1..16),
        front in 0usize..16,
    ) {
        let d = RingBufferDeque::with_contents(vals.iter().copied(), front, 16).unwrap();
        prop_assert!(d.iter().eq(vals.iter()));
        prop_assert_eq!(d.front(), vals.first());
        prop_assert_eq!(d.back(), vals.last());
        prop_assert_eq!(d.front_index(), Some(front));
        prop_assert_eq!(d.back_index(), Some((front + vals.len() - 1) % 16));
    }
}
