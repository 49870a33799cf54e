//! Module: page
//! Responsibility: page request and page result contracts.
//! Does not own: cursor token protocol or scan execution.
//! Boundary: the values callers hand to and receive from the paginator.

use crate::direction::{OrderDirection, PageDirection};

///
/// PageRequest
///
/// One page request. Every field is optional input from the outside world;
/// the paginator resolves defaults, clamps the limit, and treats an
/// undecodable cursor as absent.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageRequest {
    pub sort_by: Option<String>,
    pub order: Option<OrderDirection>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
    pub direction: PageDirection,
}

impl PageRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    /// Override the sort field's default order.
    #[must_use]
    pub const fn order(mut self, order: OrderDirection) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn cursor(mut self, token: impl Into<String>) -> Self {
        self.cursor = Some(token.into());
        self
    }

    /// Set the cursor from an optional token, as handed back in a
    /// [`PageResult`].
    #[must_use]
    pub fn cursor_opt(mut self, token: Option<String>) -> Self {
        self.cursor = token;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn direction(mut self, direction: PageDirection) -> Self {
        self.direction = direction;
        self
    }

    /// True when the request carries a non-blank cursor token.
    #[must_use]
    pub fn has_cursor(&self) -> bool {
        self.cursor
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }
}

///
/// PageResult
///
/// One page of entities in nominal order plus continuation tokens.
///
/// `next_cursor` continues in the requested direction; `prev_cursor`
/// points back toward the page the request came from and is used with the
/// opposite [`PageDirection`].
///

#[derive(Clone, Debug, PartialEq)]
pub struct PageResult<E> {
    items: Vec<E>,
    next_cursor: Option<String>,
    prev_cursor: Option<String>,
    has_more: bool,
}

impl<E> PageResult<E> {
    #[must_use]
    pub const fn new(
        items: Vec<E>,
        next_cursor: Option<String>,
        prev_cursor: Option<String>,
        has_more: bool,
    ) -> Self {
        Self {
            items,
            next_cursor,
            prev_cursor,
            has_more,
        }
    }

    /// Page with no items and no continuation.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), None, None, false)
    }

    #[must_use]
    pub fn items(&self) -> &[E] {
        &self.items
    }

    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    #[must_use]
    pub fn prev_cursor(&self) -> Option<&str> {
        self.prev_cursor.as_deref()
    }

    /// Whether more rows exist beyond this page in the requested direction.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map items while keeping continuation state.
    #[must_use]
    pub fn map<T>(self, f: impl FnMut(E) -> T) -> PageResult<T> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            prev_cursor: self.prev_cursor,
            has_more: self.has_more,
        }
    }

    /// Consume this page and return `(items, next_cursor, prev_cursor, has_more)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<E>, Option<String>, Option<String>, bool) {
        (self.items, self.next_cursor, self.prev_cursor, self.has_more)
    }
}

impl<E> Default for PageResult<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E> IntoIterator for PageResult<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

///
/// TESTS
///
