//! An array-backed binary min-heap and a priority queue built on top of it.
//!
//! ```
//! use prio_heap::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue(3);
//! queue.enqueue(1);
//! queue.enqueue(2);
//!
//! assert_eq!(queue.peek(), Ok(&1));
//! assert_eq!(queue.dequeue(), Ok(1));
//! assert_eq!(queue.dequeue(), Ok(2));
//! assert_eq!(queue.dequeue(), Ok(3));
//! assert!(queue.dequeue().is_err());
//! ```

mod error;
mod heap;
mod priority_queue;

pub use error::{Collection, Error, Result};
pub use heap::{Heap, IntoIterSorted, Iter};
pub use priority_queue::PriorityQueue;
