//! A [`BlockDeque`] is a double-ended queue that stores its elements in fixed-size [`Block`](block::Block)s.
//! Its API follows [`VecDeque`](std::collections::VecDeque) for pushing and popping at either end and indexing.
//! Unlike a `VecDeque`, growing never copies elements: a full deque only doubles the small directory of block
//! handles, so the cost of growth is proportional to the number of blocks rather than the number of elements.
//!
//! ```
//! use blockdeque::BlockDeque;
//! let mut deque: BlockDeque<i32> = BlockDeque::from([1, 2, 3, 4, 5]);
//! deque.pop_front();
//! deque.pop_front();
//! deque.pop_front();
//! assert_eq!(deque.len(), 2);
//! assert_eq!(deque[0], 4);
//! ```
//!
//! The deque is not synchronized. Sharing one between threads needs external locking.

#[macro_use]
mod macros;

pub mod block;
pub mod deque;
pub mod error;
pub mod ring;
pub mod settings;

pub use deque::BlockDeque;
pub use error::DequeError;
pub use settings::{BlockSize, Bytes4096, Bytes512, Bytes64};
