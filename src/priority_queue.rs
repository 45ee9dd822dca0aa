use core::fmt;
use core::iter::FromIterator;

use crate::error::{Collection, Error, Result};
use crate::heap::{Heap, Iter};

/// A queue whose next item out is always the one of highest priority, i.e.
/// the one that compares lowest.
///
/// All the work is done by the [`Heap`] inside; the queue only renames its
/// operations and reports empty-queue errors as its own.
///
/// # Examples
///
/// ```
/// use prio_heap::{Collection, Error, PriorityQueue};
///
/// #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
/// struct Patient {
///     priority: u8,
///     name: &'static str,
/// }
///
/// let mut waiting = PriorityQueue::new();
/// waiting.enqueue(Patient { priority: 3, name: "walk-in" });
/// waiting.enqueue(Patient { priority: 1, name: "life-threatening" });
/// waiting.enqueue(Patient { priority: 2, name: "major fracture" });
///
/// assert_eq!(waiting.peek().map(|p| p.name), Ok("life-threatening"));
/// assert_eq!(waiting.dequeue().map(|p| p.priority), Ok(1));
/// assert_eq!(waiting.dequeue().map(|p| p.priority), Ok(2));
/// assert_eq!(waiting.dequeue().map(|p| p.priority), Ok(3));
/// assert_eq!(
///     waiting.dequeue(),
///     Err(Error::EmptyCollection(Collection::PriorityQueue))
/// );
/// ```
pub struct PriorityQueue<T> {
    heap: Heap<T>,
}

impl<T: Clone> Clone for PriorityQueue<T> {
    fn clone(&self) -> Self {
        PriorityQueue {
            heap: self.heap.clone(),
        }
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    #[inline]
    fn default() -> PriorityQueue<T> {
        PriorityQueue::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PriorityQueue").field(&self.heap).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.heap, f)
    }
}

impl<T: Ord> PriorityQueue<T> {
    #[must_use]
    pub fn new() -> PriorityQueue<T> {
        PriorityQueue { heap: Heap::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> PriorityQueue<T> {
        PriorityQueue {
            heap: Heap::with_capacity(capacity),
        }
    }

    /// Adds an item to the queue.
    pub fn enqueue(&mut self, item: T) {
        self.heap.insert(item);
    }

    /// Removes the item of highest priority and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::empty(Collection::PriorityQueue));
        }
        self.heap.remove_root_item()
    }

    /// Consumes the queue and returns its items from highest to lowest
    /// priority.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap.into_sorted_vec()
    }
}

impl<T> PriorityQueue<T> {
    /// Returns the item of highest priority without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the queue is empty.
    pub fn peek(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::empty(Collection::PriorityQueue));
        }
        self.heap.get_root_item()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns an iterator over the queued items in arbitrary order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.heap.iter()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> PriorityQueue<T> {
        PriorityQueue {
            heap: Heap::from_iter(iter),
        }
    }
}

impl<T: Ord> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.heap.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a PriorityQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
