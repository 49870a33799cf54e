//! In-memory entity source.
//!
//! Rows live in an immutable `Arc<Vec<E>>` snapshot. Writers build a new
//! vector and swap the pointer, so an in-flight read keeps the snapshot it
//! started with and never blocks a writer for longer than the swap.

use crate::{
    source::{EntitySource, SourceError, SourceQuery},
    traits::EntityKind,
};
use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};
use tokio_util::sync::CancellationToken;

///
/// MemSource
///
/// Copy-on-write snapshot store implementing [`EntitySource`].
///

pub struct MemSource<E> {
    rows: RwLock<Arc<Vec<E>>>,
}

impl<E: EntityKind> MemSource<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::from_rows(Vec::new())
    }

    #[must_use]
    pub fn from_rows(rows: Vec<E>) -> Self {
        Self {
            rows: RwLock::new(Arc::new(rows)),
        }
    }

    /// Current immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<E>> {
        let guard = self.rows.read().unwrap_or_else(PoisonError::into_inner);

        Arc::clone(&guard)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one row. Id uniqueness is the caller's concern; use
    /// [`Self::upsert`] to replace by id.
    pub fn insert(&self, row: E) {
        self.write(|rows| rows.push(row));
    }

    /// Insert `row`, replacing any existing row with the same id.
    /// Returns the replaced row.
    pub fn upsert(&self, row: E) -> Option<E> {
        self.write(|rows| {
            match rows.iter_mut().find(|existing| existing.id() == row.id()) {
                Some(existing) => Some(std::mem::replace(existing, row)),
                None => {
                    rows.push(row);
                    None
                }
            }
        })
    }

    /// Remove the row with `id`, returning it when present.
    pub fn remove(&self, id: &str) -> Option<E> {
        self.write(|rows| {
            let index = rows.iter().position(|row| row.id() == id)?;

            Some(rows.remove(index))
        })
    }

    // Clone the current snapshot, mutate the copy, then publish it.
    fn write<T>(&self, mutate: impl FnOnce(&mut Vec<E>) -> T) -> T {
        let mut guard = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::clone(&guard);
        let out = mutate(&mut next);
        *guard = Arc::new(next);

        out
    }
}

impl<E: EntityKind> Default for MemSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityKind> From<Vec<E>> for MemSource<E> {
    fn from(rows: Vec<E>) -> Self {
        Self::from_rows(rows)
    }
}

impl<E: EntityKind> fmt::Debug for MemSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemSource")
            .field("entity", &E::PATH)
            .field("rows", &self.len())
            .finish()
    }
}

impl<E: EntityKind> EntitySource<E> for MemSource<E> {
    async fn execute(
        &self,
        query: SourceQuery<E>,
        cancel: CancellationToken,
    ) -> Result<Vec<E>, SourceError> {
        if cancel.is_cancelled() {
            return Err(SourceError::Cancelled);
        }

        let snapshot = self.snapshot();
        let rows = query.apply(snapshot.iter());

        if cancel.is_cancelled() {
            return Err(SourceError::Cancelled);
        }

        Ok(rows)
    }
}
