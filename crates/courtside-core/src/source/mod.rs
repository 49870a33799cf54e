//! Module: source
//! Responsibility: the ordered-query capability the paginator consumes.
//! Does not own: storage, indexing, or transaction management.
//! Boundary: `filter` / `order_by` / `take` / `execute(cancel)`.

pub mod mem;

#[cfg(test)]
mod tests;

pub use mem::MemSource;

use crate::{
    sort::{KeysetFilter, KeysetOrder},
    traits::EntityKind,
};
use std::{future::Future, sync::Arc};
use thiserror::Error as ThisError;
use tokio_util::sync::CancellationToken;

///
/// SourceError
///
/// Failure of one entity-source fetch.
///

#[derive(Debug, ThisError)]
pub enum SourceError {
    /// The fetch exceeded its deadline.
    #[error("entity source fetch timed out")]
    Timeout,

    /// The fetch observed its cancellation signal.
    #[error("entity source fetch cancelled")]
    Cancelled,

    /// The source cannot serve reads right now.
    #[error("entity source unavailable: {0}")]
    Unavailable(String),

    /// An error occurred in the storage backend.
    #[error("entity source backend error: {0}")]
    Backend(#[from] Box<dyn core::error::Error + Send + Sync + 'static>),
}

impl SourceError {
    /// Create a new backend error from any error type.
    pub fn backend<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(error))
    }
}

///
/// SourceQuery
///
/// One ordered read request: an optional keyset predicate, the scan
/// ordering, and a row limit.
///

pub struct SourceQuery<E: 'static> {
    filter: Option<KeysetFilter<E>>,
    order: Option<KeysetOrder<E>>,
    take: Option<usize>,
}

impl<E: EntityKind> SourceQuery<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filter: None,
            order: None,
            take: None,
        }
    }

    /// Restrict to rows matching `predicate`.
    #[must_use]
    pub fn filter(mut self, predicate: KeysetFilter<E>) -> Self {
        self.filter = Some(predicate);
        self
    }

    /// Apply the multi-key scan ordering.
    #[must_use]
    pub fn order_by(mut self, order: KeysetOrder<E>) -> Self {
        self.order = Some(order);
        self
    }

    /// Limit the result count.
    #[must_use]
    pub fn take(mut self, limit: usize) -> Self {
        self.take = Some(limit);
        self
    }

    #[must_use]
    pub const fn predicate(&self) -> Option<&KeysetFilter<E>> {
        self.filter.as_ref()
    }

    #[must_use]
    pub const fn ordering(&self) -> Option<&KeysetOrder<E>> {
        self.order.as_ref()
    }

    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.take
    }

    /// Evaluate this query over in-process rows.
    ///
    /// Backends without their own query engine use this to honor the full
    /// filter / order / take contract.
    pub fn apply<'a, I>(&self, rows: I) -> Vec<E>
    where
        I: IntoIterator<Item = &'a E>,
    {
        let mut matched: Vec<&E> = rows
            .into_iter()
            .filter(|row| self.filter.as_ref().is_none_or(|filter| filter.matches(row)))
            .collect();

        match (self.order.as_ref(), self.take) {
            (_, Some(0)) => matched.clear(),
            (Some(order), Some(keep)) if matched.len() > keep => {
                // Partition around the last row we keep, then sort only that prefix.
                matched.select_nth_unstable_by(keep - 1, |left, right| {
                    order.compare(left, right)
                });
                matched.truncate(keep);
                matched.sort_by(|left, right| order.compare(left, right));
            }
            (Some(order), _) => matched.sort_by(|left, right| order.compare(left, right)),
            (None, Some(keep)) => matched.truncate(keep),
            (None, None) => {}
        }

        matched.into_iter().cloned().collect()
    }
}

impl<E: EntityKind> Default for SourceQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityKind> std::fmt::Debug for SourceQuery<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceQuery")
            .field("filter", &self.filter)
            .field("order", &self.order)
            .field("take", &self.take)
            .finish()
    }
}

///
/// EntitySource
///
/// Ordered-query collaborator supplying entities to the paginator.
///
/// # Implementation Guide
///
/// - **Honor the whole query**: apply the predicate, then the scan ordering,
///   then the limit. Returning rows out of order or beyond `take` breaks
///   keyset traversal.
/// - **Snapshot reads**: one `execute` call should observe a single
///   consistent snapshot and must not block concurrent writers.
/// - **Cancellation**: abort promptly once `cancel` fires and return
///   [`SourceError::Cancelled`].
///

pub trait EntitySource<E: EntityKind>: Send + Sync + 'static {
    /// Materialize the rows selected by `query`.
    fn execute(
        &self,
        query: SourceQuery<E>,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Vec<E>, SourceError>> + Send;
}

impl<E, S> EntitySource<E> for Arc<S>
where
    E: EntityKind,
    S: EntitySource<E>,
{
    fn execute(
        &self,
        query: SourceQuery<E>,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Vec<E>, SourceError>> + Send {
        <S as EntitySource<E>>::execute(self, query, cancel)
    }
}
