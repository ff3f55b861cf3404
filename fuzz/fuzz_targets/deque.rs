#![no_main]
use std::collections::VecDeque;

use arbitrary::Arbitrary;
use circular_deque::{End, ListDeque, RingBufferDeque, MIN_CAPACITY};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Back,
    Equals,
    Front,
    Grow,
    IsEmpty,
    Iter,
    Len,
    PopBack,
    PopFront,
    PushBack(i32),
    PushFront(i32),
    Shrink,
    Dequeue(bool),
    Enqueue(bool, i32),
}

const MAX_LEN: usize = 100000;

#[derive(Arbitrary, Debug)]
struct Input {
    cap: u8,
    seed: Vec<i32>,
    front: u8,
    ops: Vec<Op>,
}

fuzz_target!(|data: Input| { fuzz(&data) });

fn fuzz(data: &Input) {
    let cap = data.cap as usize;
    let mut r = match RingBufferDeque::with_contents(data.seed.iter().copied(), data.front as usize, cap) {
        Ok(r) => r,
        Err(_) => RingBufferDeque::with_capacity(cap),
    };
    let mut v: VecDeque<i32> = r.iter().copied().collect();
    let mut l: ListDeque<i32> = v.iter().copied().collect();

    for op in &data.ops {
        match *op {
            Op::Back => {
                assert_eq!(r.back(), v.back());
                assert_eq!(l.back(), v.back());
            }
            Op::Equals => {
                assert!(r.iter().eq(v.iter()));
                assert!(l.iter().eq(v.iter()));
            }
            Op::Front => {
                assert_eq!(r.front(), v.front());
                assert_eq!(l.front(), v.front());
            }
            Op::Grow => {
                if r.capacity() < MAX_LEN {
                    r.grow();
                }
            }
            Op::IsEmpty => {
                assert_eq!(r.is_empty(), v.is_empty());
                assert_eq!(l.is_empty(), v.is_empty());
            }
            Op::Iter => {
                let mut r_iter = r.iter();
                let mut v_iter = v.iter();
                while v_iter.len() > 0 {
                    if fastrand::bool() {
                        assert_eq!(r_iter.next(), v_iter.next());
                    } else {
                        assert_eq!(r_iter.next_back(), v_iter.next_back());
                    }
                }
                assert!(l.iter().eq(v.iter()));
            }
            Op::Len => {
                assert_eq!(r.len(), v.len());
                assert_eq!(l.len(), v.len());
            }
            Op::PopBack => {
                let expected = v.pop_back();
                assert_eq!(r.dequeue(End::Back), expected);
                assert_eq!(l.dequeue(End::Back), expected);
            }
            Op::PopFront => {
                let expected = v.pop_front();
                assert_eq!(r.dequeue(End::Front), expected);
                assert_eq!(l.dequeue(End::Front), expected);
            }
            Op::PushBack(i) => {
                if v.len() < MAX_LEN {
                    r.enqueue(i, End::Back);
                    l.enqueue(i, End::Back);
                    v.push_back(i);
                }
            }
            Op::PushFront(i) => {
                if v.len() < MAX_LEN {
                    r.enqueue(i, End::Front);
                    l.enqueue(i, End::Front);
                    v.push_front(i);
                }
            }
            Op::Shrink => {
                r.shrink();
                assert!(r.capacity() >= MIN_CAPACITY);
            }
            Op::Dequeue(front) => {
                let expected = if front { v.pop_front() } else { v.pop_back() };
                assert_eq!(r.dequeue(End::from(front)), expected);
                assert_eq!(l.dequeue(End::from(front)), expected);
            }
            Op::Enqueue(front, i) => {
                if v.len() < MAX_LEN {
                    r.enqueue(i, End::from(front));
                    l.enqueue(i, End::from(front));
                    if front {
                        v.push_front(i);
                    } else {
                        v.push_back(i);
                    }
                }
            }
        }
        assert!(r.len() < r.capacity());
        assert_eq!(r.front_index().is_some(), !v.is_empty());
    }
}
