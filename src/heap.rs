use core::fmt;
use core::iter::{FromIterator, FusedIterator};
use core::mem::{swap, ManuallyDrop};
use core::ptr;

use std::slice;

use log::trace;

use crate::error::{Collection, Error, Result};

/// A binary min-heap stored as a complete binary tree in a dense vector.
///
/// The element at index `i` has its children at `2 * i + 1` and `2 * i + 2`
/// and its parent at `(i - 1) / 2`. Every element compares greater than or
/// equal to its parent, so the root is always the smallest element.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the [`Ord`]
/// trait, changes while it is in the heap. This is normally only possible
/// through [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The
/// behavior resulting from such a logic error is not specified but will not
/// be undefined behavior.
///
/// Elements that compare equal leave the heap in an unspecified order
/// relative to each other.
///
/// # Examples
///
/// ```
/// use prio_heap::Heap;
///
/// let mut heap = Heap::new();
/// assert!(heap.get_root_item().is_err());
///
/// for x in [4, 6, 2, 8, 5, 9, 1] {
///     heap.insert(x);
/// }
///
/// assert_eq!(heap.get_root_item(), Ok(&1));
/// assert_eq!(heap.len(), 7);
///
/// let mut out = Vec::new();
/// while let Ok(x) = heap.remove_root_item() {
///     out.push(x);
/// }
/// assert_eq!(out, [1, 2, 4, 5, 6, 8, 9]);
/// assert!(heap.is_empty());
/// ```
///
/// ## Max-heap
///
/// Wrapping elements in [`core::cmp::Reverse`] turns the heap around.
///
/// ```
/// use prio_heap::Heap;
/// use std::cmp::Reverse;
///
/// let mut heap = Heap::new();
/// heap.insert(Reverse(1));
/// heap.insert(Reverse(5));
/// heap.insert(Reverse(2));
///
/// assert_eq!(heap.remove_root_item(), Ok(Reverse(5)));
/// assert_eq!(heap.remove_root_item(), Ok(Reverse(2)));
/// assert_eq!(heap.remove_root_item(), Ok(Reverse(1)));
/// ```
///
/// # Time complexity
///
/// | [insert]        | [remove_root_item] | [get_root_item] |
/// |-----------------|--------------------|-----------------|
/// | *O*(log(*n*))   | *O*(log(*n*))      | *O*(1)          |
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
/// [insert]: Heap::insert
/// [remove_root_item]: Heap::remove_root_item
/// [get_root_item]: Heap::get_root_item
pub struct Heap<T> {
    data: Vec<T>,
}

impl<T: Clone> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Heap {
            data: self.data.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.data.clone_from(&source.data);
    }
}

impl<T: Ord> Default for Heap<T> {
    /// Creates an empty `Heap<T>`.
    #[inline]
    fn default() -> Heap<T> {
        Heap::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

/// Renders the backing storage for debugging. The leading `_` stands for the
/// unused slot of the 1-based layout, so the `n`-th printed element has its
/// children at `2n` and `2n + 1`.
///
/// ```
/// use prio_heap::Heap;
///
/// let heap = Heap::from([4, 6, 2]);
/// assert_eq!(heap.to_string(), "[_, 2, 6, 4]");
/// assert_eq!(Heap::<i32>::new().to_string(), "[_]");
/// ```
impl<T: fmt::Display> fmt::Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[_")?;
        for item in &self.data {
            write!(f, ", {}", item)?;
        }
        f.write_str("]")
    }
}

#[allow(unused_unsafe)]
impl<T: Ord> Heap<T> {
    /// Creates an empty `Heap`.
    ///
    /// ```
    /// use prio_heap::Heap;
    /// let mut heap = Heap::new();
    /// heap.insert(4);
    /// ```
    #[must_use]
    pub fn new() -> Heap<T> {
        Heap { data: vec![] }
    }

    /// Creates an empty `Heap` able to hold `capacity` elements before
    /// reallocating.
    ///
    /// ```
    /// use prio_heap::Heap;
    /// let mut heap = Heap::with_capacity(10);
    /// assert!(heap.capacity() >= 10);
    /// heap.insert(4);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Heap<T> {
        Heap {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Inserts an item and bubbles it up to its place.
    ///
    /// ```
    /// use prio_heap::Heap;
    /// let mut heap = Heap::new();
    /// heap.insert(3);
    /// heap.insert(5);
    /// heap.insert(1);
    ///
    /// assert_eq!(heap.len(), 3);
    /// assert_eq!(heap.get_root_item(), Ok(&1));
    /// ```
    pub fn insert(&mut self, item: T) {
        let old_len = self.len();
        self.data.push(item);
        // SAFETY: Since we pushed a new item it means that
        //  old_len = self.len() - 1 < self.len()
        let pos = unsafe { self.sift_up(old_len) };
        trace!("bubbled up from slot {} to slot {}", old_len, pos);
    }

    /// Removes the smallest item and returns it.
    ///
    /// The last element takes the root's place and is bubbled down towards
    /// the leaves until neither child is smaller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the heap is empty. The heap is
    /// left untouched in that case.
    ///
    /// ```
    /// use prio_heap::Heap;
    /// let mut heap = Heap::from([1, 3]);
    ///
    /// assert_eq!(heap.remove_root_item(), Ok(1));
    /// assert_eq!(heap.remove_root_item(), Ok(3));
    /// assert!(heap.remove_root_item().is_err());
    /// ```
    pub fn remove_root_item(&mut self) -> Result<T> {
        let mut item = self
            .data
            .pop()
            .ok_or_else(|| Error::empty(Collection::Heap))?;
        if !self.is_empty() {
            swap(&mut item, &mut self.data[0]);
            // SAFETY: !self.is_empty() means that self.len() > 0
            let pos = unsafe { self.sift_down(0) };
            trace!("bubbled down from root to slot {}", pos);
        }
        Ok(item)
    }

    /// Returns `true` if every element compares greater than or equal to
    /// its parent.
    pub fn check_integrity(&self) -> bool {
        (1..self.data.len()).all(|i| self.data[i] >= self.data[(i - 1) / 2])
    }

    /// Returns an iterator which removes elements in ascending order.
    ///
    /// ```
    /// use prio_heap::Heap;
    /// let heap = Heap::from([5, 1, 4, 2, 3]);
    ///
    /// assert_eq!(heap.into_iter_sorted().take(2).collect::<Vec<_>>(), [1, 2]);
    /// ```
    pub fn into_iter_sorted(self) -> IntoIterSorted<T> {
        IntoIterSorted { inner: self }
    }

    /// Consumes the heap and returns its elements in ascending order.
    ///
    /// ```
    /// use prio_heap::Heap;
    ///
    /// let mut heap = Heap::from([1, 2, 4, 5, 7]);
    /// heap.insert(6);
    /// heap.insert(3);
    ///
    /// assert_eq!(heap.into_sorted_vec(), [1, 2, 3, 4, 5, 6, 7]);
    /// ```
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.into_iter_sorted().collect()
    }

    // sift_up and sift_down move the element being placed out of the vector
    // (leaving behind a hole), shift the others along and write the element
    // back at the final location of the hole. `Hole` fills itself back in on
    // drop, so the vector stays intact even if `Ord` panics.

    /// Bubbles the element at `pos` towards the root while it is smaller
    /// than its parent. Returns its final position.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `pos < self.len()`.
    unsafe fn sift_up(&mut self, pos: usize) -> usize {
        // SAFETY: The caller guarantees that pos < self.len()
        let mut hole = unsafe { Hole::new(&mut self.data, pos) };

        while hole.pos() > 0 {
            let parent = (hole.pos() - 1) / 2;

            // SAFETY: hole.pos() > 0 so parent < hole.pos() is a valid
            //  index different from hole.pos().
            if hole.element() >= unsafe { hole.get(parent) } {
                break;
            }

            // SAFETY: Same as above
            unsafe { hole.move_to(parent) };
        }

        hole.pos()
    }

    /// Bubbles the element at `pos` towards the leaves while it is greater
    /// than the smaller of its children, considering only `data[..end]`.
    /// Returns its final position.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `pos < end <= self.len()`.
    unsafe fn sift_down_range(&mut self, pos: usize, end: usize) -> usize {
        // SAFETY: The caller guarantees that pos < end <= self.len().
        let mut hole = unsafe { Hole::new(&mut self.data, pos) };
        let mut child = 2 * hole.pos() + 1;

        // Loop invariant: child == 2 * hole.pos() + 1.
        while child <= end.saturating_sub(2) {
            // pick the smaller child, the left one on ties
            // SAFETY: child < end - 1 < self.len() and
            //  child + 1 < end <= self.len(), so they're valid indexes.
            //  Both are greater than hole.pos().
            child += unsafe { hole.get(child) > hole.get(child + 1) } as usize;

            // SAFETY: child is either the old child or the old child + 1,
            //  both proven valid above.
            if hole.element() <= unsafe { hole.get(child) } {
                return hole.pos();
            }

            // SAFETY: same as above.
            unsafe { hole.move_to(child) };
            child = 2 * hole.pos() + 1;
        }

        // Only a left child left to look at.
        // SAFETY: && short circuits, so child == end - 1 < self.len()
        //  whenever the comparison runs.
        if child == end - 1 && hole.element() > unsafe { hole.get(child) } {
            // SAFETY: child is a valid index != hole.pos().
            unsafe { hole.move_to(child) };
        }

        hole.pos()
    }

    /// # Safety
    ///
    /// The caller must guarantee that `pos < self.len()`.
    unsafe fn sift_down(&mut self, pos: usize) -> usize {
        let len = self.len();
        // SAFETY: pos < len is guaranteed by the caller.
        unsafe { self.sift_down_range(pos, len) }
    }

    /// Restores the heap property over the whole vector bottom-up.
    fn rebuild(&mut self) {
        let mut n = self.len() / 2;
        while n > 0 {
            n -= 1;
            // SAFETY: n starts from self.len() / 2 and goes down to 0,
            //  so n < self.len().
            unsafe { self.sift_down(n) };
        }
    }
}

impl<T> Heap<T> {
    /// Returns the smallest item without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the heap is empty.
    ///
    /// ```
    /// use prio_heap::Heap;
    /// let mut heap = Heap::new();
    /// assert!(heap.get_root_item().is_err());
    ///
    /// heap.insert(5);
    /// heap.insert(1);
    /// heap.insert(2);
    /// assert_eq!(heap.get_root_item(), Ok(&1));
    /// ```
    pub fn get_root_item(&self) -> Result<&T> {
        self.data
            .first()
            .ok_or_else(|| Error::empty(Collection::Heap))
    }

    /// Returns an iterator visiting all elements in storage order.
    ///
    /// ```
    /// use prio_heap::Heap;
    /// let heap = Heap::from([1, 2, 3, 4]);
    ///
    /// let mut seen: Vec<_> = heap.iter().copied().collect();
    /// seen.sort();
    /// assert_eq!(seen, [1, 2, 3, 4]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            iter: self.data.iter(),
        }
    }

    /// Returns the number of elements in the heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap holds no elements.
    ///
    /// ```
    /// use prio_heap::Heap;
    /// let mut heap = Heap::new();
    /// assert!(heap.is_empty());
    ///
    /// heap.insert(3);
    /// assert!(!heap.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    /// Consumes the heap and returns the backing vector in storage order.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_vec(self) -> Vec<T> {
        self.into()
    }

    /// Drops all elements.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// Hole represents a hole in a slice i.e., an index without valid value
/// (because it was moved from or duplicated).
/// In drop, `Hole` will restore the slice by filling the hole
/// position with the value that was originally removed.
struct Hole<'a, T: 'a> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// Create a new `Hole` at index `pos`.
    ///
    /// Unsafe because pos must be within the data slice.
    #[inline]
    #[allow(unused_unsafe)]
    unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        // SAFE: pos should be inside the slice
        let elt = unsafe { ptr::read(data.get_unchecked(pos)) };
        Hole {
            data,
            elt: ManuallyDrop::new(elt),
            pos,
        }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// Returns a reference to the element removed.
    #[inline]
    fn element(&self) -> &T {
        &self.elt
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Unsafe because index must be within the data slice and not equal to pos.
    #[inline]
    #[allow(unused_unsafe)]
    unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe { self.data.get_unchecked(index) }
    }

    /// Move hole to new location
    ///
    /// Unsafe because index must be within the data slice and not equal to pos.
    #[inline]
    #[allow(unused_unsafe)]
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe {
            let ptr = self.data.as_mut_ptr();
            let index_ptr: *const _ = ptr.add(index);
            let hole_ptr = ptr.add(self.pos);
            ptr::copy_nonoverlapping(index_ptr, hole_ptr, 1);
        }
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // fill the hole again
        unsafe {
            let pos = self.pos;
            ptr::copy_nonoverlapping(&*self.elt, self.data.get_unchecked_mut(pos), 1);
        }
    }
}

/// An iterator over the elements of a `Heap` in storage order.
///
/// This `struct` is created by [`Heap::iter()`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    iter: slice::Iter<'a, T>,
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.iter.as_slice()).finish()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A consuming iterator yielding the elements of a `Heap` in ascending
/// order.
///
/// This `struct` is created by [`Heap::into_iter_sorted()`].
#[derive(Clone, Debug)]
pub struct IntoIterSorted<T> {
    inner: Heap<T>,
}

impl<T: Ord> Iterator for IntoIterSorted<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.remove_root_item().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.inner.len();
        (exact, Some(exact))
    }
}

impl<T: Ord> ExactSizeIterator for IntoIterSorted<T> {}

impl<T: Ord> FusedIterator for IntoIterSorted<T> {}

impl<T: Ord> From<Vec<T>> for Heap<T> {
    /// Converts a `Vec<T>` into a `Heap<T>`.
    ///
    /// This conversion happens in-place, and has *O*(*n*) time complexity.
    fn from(vec: Vec<T>) -> Heap<T> {
        let mut heap = Heap { data: vec };
        heap.rebuild();
        heap
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Heap<T> {
    /// ```
    /// use prio_heap::Heap;
    ///
    /// let mut h1 = Heap::from([1, 4, 2, 3]);
    /// let mut h2: Heap<_> = [1, 4, 2, 3].into();
    /// while let Some((a, b)) = h1.remove_root_item().ok().zip(h2.remove_root_item().ok()) {
    ///     assert_eq!(a, b);
    /// }
    /// ```
    fn from(arr: [T; N]) -> Self {
        Self::from_iter(arr)
    }
}

impl<T> From<Heap<T>> for Vec<T> {
    /// Converts a `Heap<T>` into a `Vec<T>` in storage order.
    fn from(heap: Heap<T>) -> Vec<T> {
        heap.data
    }
}

impl<T: Ord> FromIterator<T> for Heap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Heap<T> {
        Heap::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a, T> IntoIterator for &'a Heap<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: Ord> Extend<T> for Heap<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        iter.for_each(move |item| self.insert(item));
    }
}
