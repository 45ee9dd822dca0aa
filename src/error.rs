use core::fmt;

use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The collection an [`Error`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Heap,
    PriorityQueue,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Heap => f.write_str("heap"),
            Collection::PriorityQueue => f.write_str("priority queue"),
        }
    }
}

/// Errors returned by [`Heap`](crate::Heap) and
/// [`PriorityQueue`](crate::PriorityQueue).
///
/// A failed call never modifies the collection it was made on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A peek or removal was attempted on a collection holding no elements.
    #[error("the {0} is empty")]
    EmptyCollection(Collection),
}

impl Error {
    #[cold]
    pub(crate) fn empty(collection: Collection) -> Self {
        log::debug!("rejected access to empty {}", collection);
        Error::EmptyCollection(collection)
    }

    /// Returns `true` if this error reports an empty collection.
    pub fn is_empty_collection(&self) -> bool {
        matches!(self, Error::EmptyCollection(_))
    }
}
