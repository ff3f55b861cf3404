use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DequeError {
    #[error("front offset {front} is out of range for a deque of capacity {cap}")]
    OffsetOutOfRange { front: usize, cap: usize },
    #[error("tried to seed {len} elements into a deque of capacity {cap}")]
    TooManyElements { len: usize, cap: usize },
}
