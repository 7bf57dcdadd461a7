//! Backing stores a search runs against.
//!
//! The engine only needs two operations from a store: fetch an ordered,
//! windowed slice of records matching a predicate, and count every record
//! matching a predicate. [`MemoryStore`] implements both over a `Vec`.

pub mod memory;

pub use memory::MemoryStore;

use crate::entity::SearchAdapter;
use crate::error::BackendError;
use crate::query::predicate::Predicate;
use crate::query::sort::{Ordering, PageWindow};

/// One query against a backing store
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery<F> {
    pub predicate: Predicate<F>,
    pub ordering: Ordering<F>,
    pub window: PageWindow,
}

/// A queryable source of records for adapter `A`
pub trait SearchBackend<A: SearchAdapter> {
    /// Records matching `query.predicate`, ordered, then sliced to `query.window`
    fn fetch(&self, query: &RecordQuery<A::Field>) -> Result<Vec<A::Record>, BackendError>;

    /// Number of records matching `predicate`, ignoring any window
    fn count(&self, predicate: &Predicate<A::Field>) -> Result<u64, BackendError>;
}
